//! # Scene Engine
//!
//! GameObject/Component runtime for a 3D scene editor.
//!
//! ## Features
//!
//! - **GameObjects**: named containers of components, always led by a Transform
//! - **Property tables**: one `serialize` routine per type drives saving, loading and copying
//! - **Reconciliation**: reading a table onto a live gameobject adds, keeps and removes components
//! - **Prefabs**: deep-copied templates that are instantiated into the scene
//! - **Resources**: RON documents on disk, cached and shared by handle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut resources = ResourceManager::with_root("resources");
//!     let mut scene = SceneManager::new();
//!
//!     let heli = scene.create_game_object_with("Helicopter", "Helicopter", None)?;
//!     let prefab = resources.create_resource::<Prefab>("Prefabs/Helicopter.prefab")?;
//!     if let Some(source) = scene.get(heli) {
//!         prefab.borrow_mut().clone_game_object(source, &mut resources)?;
//!     }
//!     resources.save(&prefab)?;
//!
//!     scene.create_game_object_from_prefab(&prefab, &mut resources)?;
//!     scene.frame_start(1.0 / 60.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod serialization;
pub mod assets;
pub mod ecs;
pub mod editor;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{
            Material, Mesh, Prefab, Resource, ResourceError, ResourceHandle, ResourceId, ResourceManager,
            Scene, Texture,
        },
        config::Config,
        core::config::{ApplicationConfig, AssetConfig, EngineConfig, SceneConfig},
        ecs::{
            components::{Camera, Freecam, Helicopter, StaticMesh, StaticTurret, Terrain, Transform},
            AnyComponent, Component, ComponentKind, GameObject, GameObjectId, SceneError, SceneManager,
        },
        editor::Inspector,
        foundation::{
            math::{Mat4, Quat, Vec2, Vec3, Vec4},
            time::{Stopwatch, Timer},
        },
        serialization::{PropertyTable, SerializationError, SerializedObject, Table, Value},
    };
}
