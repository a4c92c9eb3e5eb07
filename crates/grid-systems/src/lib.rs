#![warn(missing_docs)]
#![doc = "An oriented, dirty-tracked uniform 2D grid."]
#![doc = ""]
#![doc = "A [`UniformGrid2D`] splits a rectangular area into a fixed number of columns and rows."]
#![doc = "Changing its parameters marks it dirty; [`UniformGrid2D::rebuild_if_dirty`] recomputes"]
#![doc = "every cell's world-space center and notifies registered [`GridListener`]s."]

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod listener;

pub use cell::CellData;
pub use config::{GridConfig, MAX_CELLS};
pub use error::GridError;
pub use grid::UniformGrid2D;
pub use listener::{Grid, GridListener};

pub use glam::{Quat, UVec2, Vec2, Vec3};
