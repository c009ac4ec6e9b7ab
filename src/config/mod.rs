use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{ANCHOR_RADIUS, HIT_TOLERANCE};
use crate::options::color_or;
use crate::tools::ViewSettings;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Engine configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfigData {
    /// Pixel distance within which a pointer touches a line
    pub hit_tolerance: f32,
    /// Radius of the point handles
    pub anchor_radius: f32,
    pub anchor_color: String,
    pub crosshair_color: String,
    /// Where drawings are saved; the platform default when unset
    pub drawings_file: Option<PathBuf>,
    /// Save drawings after every finished edit
    pub autosave: bool,
}

impl Default for EngineConfigData {
    fn default() -> Self {
        Self {
            hit_tolerance: HIT_TOLERANCE,
            anchor_radius: ANCHOR_RADIUS,
            anchor_color: "#2962ff".to_string(),
            crosshair_color: "rgba(149, 152, 161, 0.8)".to_string(),
            drawings_file: None,
            autosave: true,
        }
    }
}

impl EngineConfigData {
    pub fn view_settings(&self) -> ViewSettings {
        let defaults = ViewSettings::default();
        ViewSettings {
            hit_tolerance: if self.hit_tolerance > 0.0 {
                self.hit_tolerance
            } else {
                defaults.hit_tolerance
            },
            anchor_radius: if self.anchor_radius > 0.0 {
                self.anchor_radius
            } else {
                defaults.anchor_radius
            },
            anchor_color: color_or(&self.anchor_color, defaults.anchor_color),
        }
    }

    pub fn crosshair_color(&self) -> Color {
        color_or(&self.crosshair_color, Color::srgba(0.6, 0.62, 0.67, 0.8))
    }

    pub fn drawings_path(&self) -> PathBuf {
        self.drawings_file
            .clone()
            .unwrap_or_else(crate::paths::default_drawings_file)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EngineConfig {
    /// The persisted configuration data
    pub data: EngineConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data: EngineConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to toggle saving after every edit
#[derive(Message)]
pub struct SetAutosaveRequest {
    pub enabled: bool,
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: EngineConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config file contents, falling back to defaults with a reason.
fn parse_config(json: &str) -> LoadConfigResult {
    match serde_json::from_str(json) {
        Ok(data) => LoadConfigResult {
            data,
            reset_reason: None,
        },
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            LoadConfigResult {
                data: EngineConfigData::default(),
                reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
            }
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: EngineConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.reset_reason.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: EngineConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
fn save_config(config: &EngineConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<EngineConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<EngineConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn set_autosave_system(
    mut events: MessageReader<SetAutosaveRequest>,
    mut config: ResMut<EngineConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.autosave != event.enabled {
            config.data.autosave = event.enabled;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
            info!("Autosave {}", if event.enabled { "enabled" } else { "disabled" });
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetAutosaveRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_autosave_system.run_if(on_message::<SetAutosaveRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
