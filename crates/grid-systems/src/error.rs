//! This module defines the error types used by the `grid-systems` crate.

#![warn(missing_docs)]

/// Error type for grid operations.
///
/// Queries on a grid are total and never fail; errors only come from
/// configuring a grid or from listeners reacting to a rebuild.
#[derive(Debug)]
pub enum GridError {
    /// Error for a degenerate grid configuration.
    /// This variant is returned when a cell count component is zero or an
    /// area extent is not a positive, finite number.
    InvalidConfiguration(&'static str),
    /// Error raised by a listener while being notified of a rebuild.
    /// The cells are already rebuilt when this is returned, but the grid stays dirty.
    ListenerFailed(anyhow::Error),
}

impl core::fmt::Display for GridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GridError::InvalidConfiguration(msg) => {
                write!(f, "Invalid grid configuration: {}", msg)
            }
            GridError::ListenerFailed(err) => write!(f, "Grid listener failed: {}", err),
        }
    }
}

impl core::error::Error for GridError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            GridError::InvalidConfiguration(_) => None,
            GridError::ListenerFailed(err) => Some(err.as_ref()),
        }
    }
}
