#![warn(missing_docs)]

use std::sync::Arc;

use glam::{Quat, UVec2, Vec2, Vec3};
use tracing::{debug, trace, warn};

use crate::cell::CellData;
use crate::config::{GridConfig, validate_area_size, validate_cell_count};
use crate::error::GridError;
use crate::listener::{Grid, GridListener};

/// Margin kept from the outer edges when resolving world positions, in area units.
/// Stops a point exactly on the far edge from flooring to a cell past the end.
const EDGE_EPSILON: f32 = 0.01;

/// An oriented rectangular grid split into `columns x rows` equally sized cells.
///
/// Changing any parameter only marks the grid dirty; cell geometry is
/// recomputed, and listeners notified, on the next [`rebuild_if_dirty`](Self::rebuild_if_dirty).
/// Cells are stored column-major: the cell at `(column, row)` lives at
/// `column * rows + row`.
pub struct UniformGrid2D {
    /// Current parameters, possibly newer than `cells`
    config: GridConfig,
    /// Set when `config` changed since the last rebuild
    is_dirty: bool,
    /// Cell geometry as of the last rebuild
    cells: Vec<CellData>,
    /// Identity-unique set of observers
    listeners: Vec<Arc<dyn GridListener>>,
}

impl UniformGrid2D {
    /// Creates a new grid and builds its cells.
    ///
    /// # Arguments
    /// * `center` - Center of the grid area in world space
    /// * `area_size` - Extent of the area along the grid's local x and y axes
    /// * `cell_count` - Number of columns (`x`) and rows (`y`)
    /// * `orientation` - Rotation from grid-local space into world space
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The built grid or an error if parameters are degenerate
    pub fn new(center: Vec3, area_size: Vec2, cell_count: UVec2, orientation: Quat) -> Result<Self, GridError> {
        Self::from_config(GridConfig::new(center, area_size, cell_count, orientation))
    }

    /// Creates a new grid from a complete configuration and builds its cells.
    pub fn from_config(config: GridConfig) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        Self::create_cells_into(&config, &mut cells)?;
        debug!(
            columns = config.cell_count.x,
            rows = config.cell_count.y,
            "Created grid"
        );
        Ok(UniformGrid2D {
            config,
            is_dirty: false,
            cells,
            listeners: Vec::with_capacity(2),
        })
    }

    /// Computes the cells for `config` into `buffer`, reusing its allocation.
    ///
    /// The buffer is grown or truncated to exactly the configuration's cell count.
    ///
    /// # Errors
    /// Returns `Err(GridError::InvalidConfiguration)` without touching the buffer
    /// if the configuration is degenerate.
    pub fn create_cells_into(config: &GridConfig, buffer: &mut Vec<CellData>) -> Result<(), GridError> {
        config.validate()?;
        build_cells(config, buffer);
        Ok(())
    }

    /// Returns a copy of the current configuration.
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Returns the grid center in world space.
    pub fn center(&self) -> Vec3 {
        self.config.center
    }

    /// Returns the extent of the grid area.
    pub fn area_size(&self) -> Vec2 {
        self.config.area_size
    }

    /// Returns the number of columns (`x`) and rows (`y`).
    pub fn cell_count(&self) -> UVec2 {
        self.config.cell_count
    }

    /// Returns the rotation from grid-local space into world space.
    pub fn orientation(&self) -> Quat {
        self.config.orientation
    }

    /// Returns the size of one cell for the current configuration.
    pub fn cell_size(&self) -> Vec2 {
        self.config.cell_size()
    }

    /// Returns the number of cells for the current configuration.
    pub fn total_cells(&self) -> usize {
        self.config.total_cells()
    }

    /// Returns true if the configuration changed since the last rebuild.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Moves the grid center.
    pub fn set_center(&mut self, center: Vec3) {
        self.mark_dirty_if(self.config.center != center, "center");
        self.config.center = center;
    }

    /// Changes the extent of the grid area.
    ///
    /// # Errors
    /// Returns `Err(GridError::InvalidConfiguration)` if either extent is not
    /// positive and finite. The grid is left unchanged.
    pub fn set_area_size(&mut self, area_size: Vec2) -> Result<(), GridError> {
        if let Err(err) = validate_area_size(area_size) {
            warn!(?area_size, "Rejected grid area size");
            return Err(err);
        }
        self.mark_dirty_if(self.config.area_size != area_size, "area_size");
        self.config.area_size = area_size;
        Ok(())
    }

    /// Changes the number of columns and rows.
    ///
    /// # Errors
    /// Returns `Err(GridError::InvalidConfiguration)` if either component is zero
    /// or the total exceeds [`MAX_CELLS`](crate::config::MAX_CELLS). The grid is left unchanged.
    pub fn set_cell_count(&mut self, cell_count: UVec2) -> Result<(), GridError> {
        if let Err(err) = validate_cell_count(cell_count) {
            warn!(?cell_count, "Rejected grid cell count");
            return Err(err);
        }
        self.mark_dirty_if(self.config.cell_count != cell_count, "cell_count");
        self.config.cell_count = cell_count;
        Ok(())
    }

    /// Rotates the grid.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.mark_dirty_if(self.config.orientation != orientation, "orientation");
        self.config.orientation = orientation;
    }

    /// Replaces every parameter at once.
    ///
    /// The whole configuration is validated before anything is applied.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), GridError> {
        if let Err(err) = config.validate() {
            warn!(?config, "Rejected grid configuration");
            return Err(err);
        }
        self.set_center(config.center);
        self.set_area_size(config.area_size)?;
        self.set_cell_count(config.cell_count)?;
        self.set_orientation(config.orientation);
        Ok(())
    }

    fn mark_dirty_if(&mut self, changed: bool, field: &'static str) {
        if changed && !self.is_dirty {
            trace!(field, "Grid marked dirty");
        }
        self.is_dirty = changed || self.is_dirty;
    }

    /// Recomputes all cells and notifies listeners if the grid is dirty.
    ///
    /// # Returns
    /// * `Ok(true)` - The grid was rebuilt and every listener notified
    /// * `Ok(false)` - The grid was clean, nothing happened
    /// * `Err(GridError::ListenerFailed)` - A listener failed; the cells are
    ///   rebuilt but the grid stays dirty so the next call notifies again
    pub fn rebuild_if_dirty(&mut self) -> Result<bool, GridError> {
        if !self.is_dirty {
            return Ok(false);
        }

        build_cells(&self.config, &mut self.cells);
        debug!(
            columns = self.config.cell_count.x,
            rows = self.config.cell_count.y,
            listeners = self.listeners.len(),
            "Rebuilt grid cells"
        );
        self.inform_listeners()?;
        self.is_dirty = false;
        Ok(true)
    }

    fn inform_listeners(&self) -> Result<(), GridError> {
        for listener in &self.listeners {
            if let Err(err) = listener.on_grid_changed(self) {
                warn!(error = %err, "Grid listener failed during rebuild notification");
                return Err(GridError::ListenerFailed(err));
            }
        }
        Ok(())
    }

    /// Registers a listener. Adding the same `Arc` twice is a no-op.
    pub fn add_listener(&mut self, listener: Arc<dyn GridListener>) {
        let addr = listener_addr(&listener);
        if self.listeners.iter().any(|l| listener_addr(l) == addr) {
            return;
        }
        self.listeners.push(listener);
    }

    /// Unregisters a listener. Removing a listener that is not registered is a no-op.
    pub fn remove_listener<L: GridListener + ?Sized>(&mut self, listener: &Arc<L>) {
        let addr = listener_addr(listener);
        self.listeners.retain(|l| listener_addr(l) != addr);
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Maps a world-space point to the index of the cell containing it.
    ///
    /// Points outside the grid resolve to the nearest edge cell, so the result
    /// is always in `[0, total_cells)`. The lookup uses the current
    /// configuration even if the cells have not been rebuilt yet: while the
    /// grid is dirty the index may lie past the end of [`cells`](Self::cells),
    /// in which case [`cell`](Self::cell) returns `None`.
    pub fn index_by_world_pos(&self, world_pos: Vec3) -> usize {
        let GridConfig {
            center,
            area_size,
            cell_count,
            orientation,
        } = self.config;

        let local = orientation.inverse() * (world_pos - center);
        let half = area_size * 0.5;

        // max/min rather than clamp: the range is empty for areas under 2 * EDGE_EPSILON
        let x = local.x.max(-half.x + EDGE_EPSILON).min(half.x - EDGE_EPSILON);
        let y = local.y.max(-half.y + EDGE_EPSILON).min(half.y - EDGE_EPSILON);

        let normalized_x = (x + half.x) / area_size.x;
        let normalized_y = (y + half.y) / area_size.y;

        let column = ((normalized_x * cell_count.x as f32).floor() as i64).clamp(0, i64::from(cell_count.x) - 1);
        let row = ((normalized_y * cell_count.y as f32).floor() as i64).clamp(0, i64::from(cell_count.y) - 1);

        column as usize * cell_count.y as usize + row as usize
    }

    /// Returns the indices of the up to 8 cells surrounding `center_index`.
    ///
    /// Neighbours are ordered by column offset, then row offset, each in
    /// `-1, 0, 1` order. Cells past the grid border are left out, as is the
    /// center itself. An out-of-range `center_index` has no neighbours.
    pub fn neighbour_indices(&self, center_index: usize) -> Vec<usize> {
        let mut neighbours = Vec::with_capacity(8);
        self.neighbour_indices_into(center_index, &mut neighbours);
        neighbours
    }

    /// Same as [`neighbour_indices`](Self::neighbour_indices), writing into a
    /// caller-owned buffer. The buffer is cleared first.
    pub fn neighbour_indices_into(&self, center_index: usize, out: &mut Vec<usize>) {
        Self::neighbour_indices_for(self.config.cell_count, center_index, out);
    }

    /// Neighbourhood query for an arbitrary cell count, without a grid instance.
    pub fn neighbour_indices_for(cell_count: UVec2, center_index: usize, out: &mut Vec<usize>) {
        out.clear();

        let columns = cell_count.x as usize;
        let rows = cell_count.y as usize;
        if center_index >= columns * rows {
            return;
        }

        let column = center_index / rows;
        let row = center_index % rows;

        for dx in -1isize..=1 {
            for dy in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let (Some(nx), Some(ny)) = (column.checked_add_signed(dx), row.checked_add_signed(dy)) else {
                    continue;
                };
                if nx >= columns || ny >= rows {
                    continue;
                }

                out.push(nx * rows + ny);
            }
        }
    }

    /// Returns the neighbours of the cell containing `world_pos`.
    pub fn neighbour_indices_at(&self, world_pos: Vec3) -> Vec<usize> {
        self.neighbour_indices(self.index_by_world_pos(world_pos))
    }

    /// Same as [`neighbour_indices_at`](Self::neighbour_indices_at), writing
    /// into a caller-owned buffer.
    pub fn neighbour_indices_at_into(&self, world_pos: Vec3, out: &mut Vec<usize>) {
        self.neighbour_indices_into(self.index_by_world_pos(world_pos), out);
    }

    /// Returns the cells as of the last rebuild.
    ///
    /// Call [`rebuild_if_dirty`](Self::rebuild_if_dirty) first if the cells
    /// must reflect the current configuration.
    pub fn cells(&self) -> &[CellData] {
        &self.cells
    }

    /// Returns the cell at `index`, if it exists.
    pub fn cell(&self, index: usize) -> Option<&CellData> {
        self.cells.get(index)
    }

    /// Returns the cell at `(column, row)`, if it exists.
    pub fn cell_at(&self, column: usize, row: usize) -> Option<&CellData> {
        self.index_of(column, row).and_then(|index| self.cells.get(index))
    }

    /// Combines a column and row into a cell index.
    /// Returns None if the coordinates are outside the grid.
    pub fn index_of(&self, column: usize, row: usize) -> Option<usize> {
        let columns = self.config.cell_count.x as usize;
        let rows = self.config.cell_count.y as usize;
        (column < columns && row < rows).then(|| column * rows + row)
    }

    /// Splits a cell index into `(column, row)`.
    /// Returns None if the index is outside the grid.
    pub fn coords_of(&self, index: usize) -> Option<(usize, usize)> {
        let rows = self.config.cell_count.y as usize;
        (index < self.total_cells()).then(|| (index / rows, index % rows))
    }
}

impl Grid for UniformGrid2D {
    fn center(&self) -> Vec3 {
        self.config.center
    }

    fn area_size(&self) -> Vec2 {
        self.config.area_size
    }

    fn cell_count(&self) -> UVec2 {
        self.config.cell_count
    }

    fn cells(&self) -> &[CellData] {
        &self.cells
    }
}

impl std::fmt::Debug for UniformGrid2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformGrid2D")
            .field("config", &self.config)
            .field("is_dirty", &self.is_dirty)
            .field("cells", &self.cells.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl std::fmt::Display for UniformGrid2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "UniformGrid2D ({}x{} cells, area: {:.3}x{:.3})",
            self.config.cell_count.x, self.config.cell_count.y, self.config.area_size.x, self.config.area_size.y
        )?;
        writeln!(
            f,
            "Center: ({:.3}, {:.3}, {:.3})",
            self.config.center.x, self.config.center.y, self.config.center.z
        )?;

        // Top row first so the table reads like the grid seen from above
        let columns = self.config.cell_count.x as usize;
        let rows = self.config.cell_count.y as usize;
        for row in (0..rows).rev() {
            for column in 0..columns {
                write!(f, "{:4} ", column * rows + row)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn listener_addr<L: ?Sized>(listener: &Arc<L>) -> *const () {
    Arc::as_ptr(listener).cast()
}

/// Full recomputation of every cell. `config` must already be validated.
fn build_cells(config: &GridConfig, buffer: &mut Vec<CellData>) {
    let columns = config.cell_count.x as usize;
    let rows = config.cell_count.y as usize;

    buffer.resize(config.total_cells(), CellData::default());

    let cell_size = config.cell_size();
    // Local position of the center of cell (0, 0)
    let origin_offset = (-config.area_size * 0.5 + cell_size * 0.5).extend(0.0);

    for column in 0..columns {
        for row in 0..rows {
            let local = Vec3::new(cell_size.x * column as f32, cell_size.y * row as f32, 0.0) + origin_offset;
            let world = config.center + config.orientation * local;
            let index = column * rows + row;
            buffer[index] = CellData::new(index, column, row, world, cell_size);
        }
    }
}
