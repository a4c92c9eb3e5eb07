mod listeners;   // brings `listeners.rs` in as `crate::listeners`
mod settings;    // brings `settings.rs` in as `crate::settings`

use std::sync::Arc;

use anyhow::Context;
use grid_systems::{Quat, UVec2, UniformGrid2D, Vec3};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

use listeners::ChangeLog;
use settings::{DEFAULT_CONFIG_PATH, DemoSettings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = settings::load_settings(&path)
        .with_context(|| format!("Failed to load grid settings from {}", path))?;

    let mut grid = UniformGrid2D::from_config(settings.grid).context("Invalid grid in settings")?;
    let change_log = Arc::new(ChangeLog::default());
    grid.add_listener(change_log.clone());

    println!("{}", grid);
    report_probes(&grid, &settings.demo.probes);

    apply_mutations(&mut grid, &settings.demo)?;
    if grid.rebuild_if_dirty()? {
        println!("\n{}", grid);
        report_probes(&grid, &settings.demo.probes);
    } else {
        info!("No mutations configured, grid left as loaded");
    }

    info!(rebuilds = change_log.snapshot().len(), "Demo finished");
    Ok(())
}

fn apply_mutations(grid: &mut UniformGrid2D, demo: &DemoSettings) -> anyhow::Result<()> {
    if let Some(count) = demo.resize_to {
        grid.set_cell_count(UVec2::from_array(count))?;
    }
    if let Some(degrees) = demo.rotate_degrees {
        grid.set_orientation(grid.orientation() * Quat::from_rotation_z(degrees.to_radians()));
    }
    if let Some(offset) = demo.translate_by {
        grid.set_center(grid.center() + Vec3::from_array(offset));
    }
    Ok(())
}

fn report_probes(grid: &UniformGrid2D, probes: &[[f32; 3]]) {
    for probe in probes {
        let world_pos = Vec3::from_array(*probe);
        let index = grid.index_by_world_pos(world_pos);
        match grid.cell(index) {
            Some(cell) => println!(
                "({:.2}, {:.2}, {:.2}) -> {}  neighbours {:?}",
                world_pos.x,
                world_pos.y,
                world_pos.z,
                cell,
                grid.neighbour_indices(index)
            ),
            None => println!("({:.2}, {:.2}, {:.2}) -> #{} (not built yet)", world_pos.x, world_pos.y, world_pos.z, index),
        }
    }
}
