use glam::{Vec2, Vec3};

/// One rectangular subdivision of a grid.
///
/// Cells are produced by a full-grid rebuild and never mutated in place.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    /// Position of the cell in the cell store, `column * rows + row`.
    pub index: usize,
    /// The column (x) coordinate of the cell.
    pub column: usize,
    /// The row (y) coordinate of the cell.
    pub row: usize,
    /// Center of the cell in world space.
    pub world_center: Vec3,
    /// Extent of the cell along the grid's local x and y axes.
    pub size: Vec2,
}

impl CellData {
    /// Creates a new `CellData`.
    #[must_use]
    pub const fn new(index: usize, column: usize, row: usize, world_center: Vec3, size: Vec2) -> Self {
        Self {
            index,
            column,
            row,
            world_center,
            size,
        }
    }
}

impl std::fmt::Display for CellData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} ({}, {}) @ ({:.3}, {:.3}, {:.3}) size {:.3}x{:.3}",
            self.index,
            self.column,
            self.row,
            self.world_center.x,
            self.world_center.y,
            self.world_center.z,
            self.size.x,
            self.size.y
        )
    }
}
