//! Viewer settings persistence

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
pub const APP_CONFIG_DIR_NAME: &str = "pcxview";

/// Settings consumed by the viewer when rendering decoder outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    /// Cell size of palette and histogram grids, in pixels
    pub palette_cell_size: u32,
    /// Maximum number of colors in a histogram grid
    pub histogram_max_entries: usize,
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            palette_cell_size: 16,
            histogram_max_entries: 256,
            log_filter: "pcxview=debug".to_string(),
        }
    }
}

impl ViewerSettings {
    /// Load settings from a JSON file. A missing or unreadable file yields
    /// the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!("Invalid viewer settings {:?}: {}", path, err);
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("Failed to load viewer settings {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// `<config dir>/pcxview/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_CONFIG_DIR_NAME)
            .join("settings.json")
    }
}
