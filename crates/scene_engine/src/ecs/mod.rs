//! Gameobject / component runtime
//!
//! Gameobjects own a closed set of component variants, reconcile them
//! against property tables, and live in a [`SceneManager`] that drives the
//! per-frame update.

pub mod component;
pub mod components;
pub mod context;
pub mod game_object;
pub mod handle;
pub mod scene_manager;

pub use component::{AnyComponent, Component, ComponentError, ComponentKind};
pub use context::{ComponentContext, SceneSnapshot};
pub use game_object::GameObject;
pub use handle::GameObjectId;
pub use scene_manager::{ComponentEntry, SceneError, SceneManager, SceneStats};

#[cfg(test)]
mod tests;
