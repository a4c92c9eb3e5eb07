use grid_systems::{Quat, UVec2, UniformGrid2D, Vec2, Vec3};

fn main() {
    // A 5x5 grid of 1m cells centered at the origin
    let grid = UniformGrid2D::new(Vec3::ZERO, Vec2::splat(5.0), UVec2::new(5, 5), Quat::IDENTITY).unwrap();

    println!("{}", grid);

    for world_pos in [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(-2.4, -2.4, 0.0),
        Vec3::new(2.5, 0.3, 0.0),
        Vec3::new(40.0, -40.0, 0.0),
    ] {
        let index = grid.index_by_world_pos(world_pos);
        let cell = grid.cell(index).unwrap();
        println!(
            "World position {:?} maps to cell {} (column {}, row {})",
            world_pos, index, cell.column, cell.row
        );
        println!("  neighbours: {:?}", grid.neighbour_indices(index));
    }

    // Reusing one buffer for many queries
    let mut buffer = Vec::with_capacity(8);
    let mut total = 0;
    for index in 0..grid.total_cells() {
        grid.neighbour_indices_into(index, &mut buffer);
        total += buffer.len();
    }
    println!("\nAverage neighbourhood size: {:.2}", total as f32 / grid.total_cells() as f32);
}
