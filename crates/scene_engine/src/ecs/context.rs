//! Per-frame update context handed to components

use std::collections::HashMap;

use super::components::Transform;
use super::GameObjectId;
use crate::foundation::math::Vec3;

/// Read-only view of the live set, captured at the start of a frame
///
/// Components that track other gameobjects hold [`GameObjectId`]s and resolve
/// them here; a destroyed gameobject is simply absent.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    positions: HashMap<GameObjectId, Vec3>,
}

impl SceneSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a gameobject's world position
    pub fn insert(&mut self, id: GameObjectId, world_position: Vec3) {
        self.positions.insert(id, world_position);
    }

    /// World position of `id` at the start of the frame
    pub fn position(&self, id: GameObjectId) -> Option<Vec3> {
        self.positions.get(&id).copied()
    }

    /// Whether `id` was live at the start of the frame
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Number of gameobjects captured
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no gameobjects were captured
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// What a component may see and touch during `update`
///
/// The owner's Transform is lent mutably to every other component in turn.
/// The Transform's own update receives no transform.
pub struct ComponentContext<'a> {
    owner: Option<GameObjectId>,
    transform: Option<&'a mut Transform>,
    scene: &'a SceneSnapshot,
}

impl<'a> ComponentContext<'a> {
    /// Build a context for one component update
    pub fn new(
        owner: Option<GameObjectId>,
        transform: Option<&'a mut Transform>,
        scene: &'a SceneSnapshot,
    ) -> Self {
        Self { owner, transform, scene }
    }

    /// Handle of the owning gameobject, if it is live
    pub fn owner(&self) -> Option<GameObjectId> {
        self.owner
    }

    /// The owner's Transform
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_deref()
    }

    /// The owner's Transform, mutably
    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.transform.as_deref_mut()
    }

    /// Snapshot of the live set
    pub fn scene(&self) -> &'a SceneSnapshot {
        self.scene
    }
}
