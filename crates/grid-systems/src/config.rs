//! Grid parameters.
//!
//! A [`GridConfig`] is the full set of inputs a grid derives its cells from.
//! It is a plain value: grids own one, validate it on every mutation and hand
//! out copies through [`UniformGrid2D::config`](crate::UniformGrid2D::config).

use glam::{Quat, UVec2, Vec2, Vec3};

use crate::error::GridError;

/// Center, extent, subdivision and orientation of a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Center of the grid area in world space.
    pub center: Vec3,
    /// Extent of the grid area along its local x and y axes.
    pub area_size: Vec2,
    /// Number of columns (`x`) and rows (`y`).
    pub cell_count: UVec2,
    /// Rotation from grid-local space into world space.
    pub orientation: Quat,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            area_size: Vec2::ONE,
            cell_count: UVec2::ONE,
            orientation: Quat::IDENTITY,
        }
    }
}

impl GridConfig {
    /// Creates a new `GridConfig`. The result is not validated.
    pub const fn new(center: Vec3, area_size: Vec2, cell_count: UVec2, orientation: Quat) -> Self {
        Self {
            center,
            area_size,
            cell_count,
            orientation,
        }
    }

    /// Checks that the configuration describes a non-degenerate grid.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::InvalidConfiguration)` if either cell count
    /// component is zero, the total exceeds [`MAX_CELLS`], or either area extent
    /// is not positive and finite.
    pub fn validate(&self) -> Result<(), GridError> {
        validate_cell_count(self.cell_count)?;
        validate_area_size(self.area_size)
    }

    /// Size of a single cell: the area extent divided by the column and row counts.
    pub fn cell_size(&self) -> Vec2 {
        self.area_size / self.cell_count.as_vec2()
    }

    /// Number of cells described by this configuration.
    pub fn total_cells(&self) -> usize {
        self.cell_count.x as usize * self.cell_count.y as usize
    }
}

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = i32::MAX as usize;

pub(crate) fn validate_cell_count(cell_count: UVec2) -> Result<(), GridError> {
    if cell_count.x == 0 || cell_count.y == 0 {
        return Err(GridError::InvalidConfiguration(
            "Column and row counts must be non-zero",
        ));
    }
    if u64::from(cell_count.x) * u64::from(cell_count.y) > MAX_CELLS as u64 {
        return Err(GridError::InvalidConfiguration(
            "Cell count too large, exceeds MAX_CELLS",
        ));
    }
    Ok(())
}

pub(crate) fn validate_area_size(area_size: Vec2) -> Result<(), GridError> {
    if !area_size.is_finite() || area_size.x <= 0.0 || area_size.y <= 0.0 {
        return Err(GridError::InvalidConfiguration(
            "Area size must be positive and finite",
        ));
    }
    Ok(())
}
