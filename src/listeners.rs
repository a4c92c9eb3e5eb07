use parking_lot::RwLock;

use grid_systems::{GridListener, UVec2, UniformGrid2D, Vec3};
use tracing::info;

/// One observed rebuild.
#[derive(Clone, Debug)]
pub struct ChangeRecord {
    pub cell_count: UVec2,
    pub center: Vec3,
}

/// Logs every rebuild and keeps a history of them.
#[derive(Default)]
pub struct ChangeLog {
    history: RwLock<Vec<ChangeRecord>>,
}

impl ChangeLog {
    pub fn snapshot(&self) -> Vec<ChangeRecord> {
        self.history.read().clone()
    }
}

impl GridListener for ChangeLog {
    fn on_grid_changed(&self, grid: &UniformGrid2D) -> anyhow::Result<()> {
        let record = ChangeRecord {
            cell_count: grid.cell_count(),
            center: grid.center(),
        };
        info!(
            columns = record.cell_count.x,
            rows = record.cell_count.y,
            center = ?record.center,
            "Grid rebuilt"
        );
        self.history.write().push(record);
        Ok(())
    }
}
