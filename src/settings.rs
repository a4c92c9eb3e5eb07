use config::{Config, ConfigError, File, FileFormat};
use grid_systems::GridConfig;
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the demo reads from its configuration file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Mutations and queries the demo runs against the grid.
#[derive(Debug, Default, Deserialize)]
pub struct DemoSettings {
    /// World positions to resolve to cells, before and after the mutation
    #[serde(default)]
    pub probes: Vec<[f32; 3]>,
    /// New column and row count applied before the rebuild
    pub resize_to: Option<[u32; 2]>,
    /// Extra rotation about the grid normal, in degrees
    pub rotate_degrees: Option<f32>,
    /// Offset added to the grid center
    pub translate_by: Option<[f32; 3]>,
}

pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
