use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Viewer settings loaded from ~/.config/reasoning-view/settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Print reasoning content (dimmed) alongside the response
    pub show_thinking: bool,
    /// Print the literal tag markers as well
    pub show_markers: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_thinking: true,
            show_markers: false,
        }
    }
}

static SETTINGS: OnceLock<ViewSettings> = OnceLock::new();

/// Get the loaded settings, initializing them lazily on first use.
pub fn get_settings() -> &'static ViewSettings {
    SETTINGS.get_or_init(|| match load_settings_from_disk() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Failed to load settings: {err}");
            ViewSettings::default()
        }
    })
}

fn load_settings_from_disk() -> Result<ViewSettings> {
    let settings_path = crate::config::config_dir()?.join("settings.json");
    load_settings_from(&settings_path)
}

fn load_settings_from(settings_path: &Path) -> Result<ViewSettings> {
    if !settings_path.exists() {
        return Ok(ViewSettings::default());
    }

    let contents = std::fs::read_to_string(settings_path).map_err(|err| {
        tracing::warn!(
            "Failed to read settings from {}: {err}",
            settings_path.display()
        );
        err
    })?;

    let settings: ViewSettings = serde_json::from_str(&contents).map_err(|err| {
        tracing::warn!(
            "Failed to parse settings from {}: {err}",
            settings_path.display()
        );
        err
    })?;

    Ok(settings)
}
