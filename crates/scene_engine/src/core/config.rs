//! # Unified Configuration System
//!
//! All configuration structures for the scene runtime and its host in one
//! place. Each subsystem gets its own section:
//!
//! - **Engine Config**: logging, debug features, frame pacing
//! - **Asset Config**: where resource documents live on disk
//! - **Scene Config**: default prefabs spawned at startup, session scene path

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core runtime behavior: logging, debug features and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// Target FPS for frame rate limiting
    pub target_fps: Option<u32>,
    /// Fixed frame step in seconds; wall-clock time is used when unset
    pub fixed_delta_time: Option<f32>,
    /// Number of frames a headless host runs before shutting down
    pub headless_frames: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            target_fps: None,
            fixed_delta_time: None,
            headless_frames: 600,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use a fixed frame step instead of wall-clock time
    pub fn with_fixed_delta_time(mut self, delta_time: f32) -> Self {
        self.fixed_delta_time = Some(delta_time);
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Resource documents (prefabs, materials, scenes) are addressed by paths
/// relative to `assets_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for resource documents
    pub assets_dir: String,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: "resources".to_string(),
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Prefabs instantiated into the live set when the editor starts
    pub default_prefabs: Vec<String>,
    /// Where the host saves the live set on shutdown
    pub session_scene: String,
}

impl SceneConfig {
    /// Create a new scene configuration
    pub fn new() -> Self {
        Self {
            default_prefabs: vec![
                "Prefabs/Camera.prefab".to_string(),
                "Prefabs/Terrain.prefab".to_string(),
                "Prefabs/Helicopter.prefab".to_string(),
            ],
            session_scene: "Scenes/session.scene".to_string(),
        }
    }

    /// Replace the list of default prefabs
    pub fn with_default_prefabs<I, S>(mut self, prefabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_prefabs = prefabs.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
    /// Scene configuration
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.assets.assets_dir.is_empty() {
            return Err("Assets directory cannot be empty".to_string());
        }

        if let Some(step) = self.engine.fixed_delta_time {
            if !(step > 0.0 && step.is_finite()) {
                return Err(format!("Fixed delta time must be positive, got {step}"));
            }
        }

        if self.engine.target_fps == Some(0) {
            return Err("Target FPS must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");

        let mut config = ApplicationConfig::default();
        config.engine = config.engine.with_log_level("debug").with_fixed_delta_time(0.02);
        config.scene = config.scene.with_default_prefabs(["Prefabs/Camera.prefab"]);
        config.save_to_file(&path).unwrap();

        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");

        let config = ApplicationConfig::default();
        config.save_to_file(&path).unwrap();

        assert_eq!(ApplicationConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApplicationConfig = toml::from_str("[engine]\nlog_level = \"warn\"\n").unwrap();
        assert_eq!(config.engine.log_level, "warn");
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::load_from_file("editor.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_bad_step() {
        let mut config = ApplicationConfig::default();
        config.engine.fixed_delta_time = Some(0.0);
        assert!(config.validate().is_err());
    }
}
