//! Rebuild notifications and the read-only grid capability listeners see.

use glam::{UVec2, Vec2, Vec3};

use crate::cell::CellData;
use crate::grid::UniformGrid2D;

/// Read-only view of a grid's parameters and cells.
pub trait Grid {
    /// Center of the grid area in world space.
    fn center(&self) -> Vec3;
    /// Extent of the grid area along its local axes.
    fn area_size(&self) -> Vec2;
    /// Number of columns (`x`) and rows (`y`).
    fn cell_count(&self) -> UVec2;
    /// Cells as of the last rebuild.
    fn cells(&self) -> &[CellData];
}

/// Observer notified after every grid rebuild.
///
/// Listeners are registered by `Arc` identity with
/// [`UniformGrid2D::add_listener`]. Returning an error stops the notification
/// round and surfaces as [`GridError::ListenerFailed`](crate::GridError::ListenerFailed)
/// from [`UniformGrid2D::rebuild_if_dirty`].
pub trait GridListener: Send + Sync {
    /// Called once per rebuild, after all cells have been recomputed.
    fn on_grid_changed(&self, grid: &UniformGrid2D) -> anyhow::Result<()>;
}
