use std::sync::Arc;

use grid_systems::{GridListener, Quat, UVec2, UniformGrid2D, Vec2, Vec3};

struct PrintOnChange;

impl GridListener for PrintOnChange {
    fn on_grid_changed(&self, grid: &UniformGrid2D) -> anyhow::Result<()> {
        println!("Grid changed, {} cells of size {:?}", grid.cells().len(), grid.cell_size());
        for cell in grid.cells() {
            println!("  {}", cell);
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut grid = UniformGrid2D::new(Vec3::new(2.0, 1.0, 0.0), Vec2::new(4.0, 2.0), UVec2::new(4, 2), Quat::IDENTITY)?;
    grid.add_listener(Arc::new(PrintOnChange));

    // Nothing to do, the grid was built on construction
    assert!(!grid.rebuild_if_dirty()?);

    // Turn the grid by 30 degrees and double the resolution
    grid.set_orientation(Quat::from_rotation_z(30f32.to_radians()));
    grid.set_cell_count(UVec2::new(8, 4))?;
    grid.rebuild_if_dirty()?;

    // Zero rows is rejected, the grid keeps its last good configuration
    if let Err(e) = grid.set_cell_count(UVec2::new(8, 0)) {
        println!("\n{}", e);
    }
    println!("Still {} cells, dirty: {}", grid.cells().len(), grid.is_dirty());
    Ok(())
}
