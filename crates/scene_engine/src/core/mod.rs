//! # Core Module
//!
//! Shared configuration used by the scene runtime and its host application.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration system for all subsystems
//! - **Foundation**: Low-level utilities (math, time, logging)
//! - **Assets**: Resource loading and prefabs
//! - **ECS**: GameObjects, components and the scene manager

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::assets;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    AssetConfig,
    SceneConfig,
    Config,
    ConfigError,
};
