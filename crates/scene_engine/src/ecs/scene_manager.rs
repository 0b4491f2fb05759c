//! # Scene Manager
//!
//! Owns the live set of gameobjects, drives their per-frame update and
//! answers typed queries over them. It is an explicit context object created
//! by the host; nothing here is global.

use log::{debug, info, trace, warn};
use slotmap::SlotMap;
use thiserror::Error;

use super::components::{Camera, StaticMesh, Terrain, Transform};
use super::{Component, ComponentError, ComponentKind, GameObject, GameObjectId, SceneSnapshot};
use crate::assets::{Prefab, ResourceError, ResourceHandle, ResourceManager, Scene};
use crate::core::config::SceneConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::time::Stopwatch;
use crate::serialization::{SerializationError, Table};

/// Scene management errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// The handle refers to a gameobject that no longer exists
    #[error("Gameobject handle {0:?} is stale")]
    StaleHandle(GameObjectId),

    /// Component registry error
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Resource loading error
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Table copy error
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Statistics for the most recent frame
#[derive(Debug, Clone, Default)]
pub struct SceneStats {
    /// Live gameobjects
    pub game_object_count: usize,
    /// Components across all live gameobjects
    pub component_count: usize,
    /// Frames updated so far
    pub frame_count: u64,
    /// Time spent in the last `frame_start` (microseconds)
    pub update_time_us: u64,
}

/// A component found by a scene query, with its owner
#[derive(Debug)]
pub struct ComponentEntry<'a, T> {
    /// Owner handle
    pub id: GameObjectId,
    /// Owner
    pub game_object: &'a GameObject,
    /// The component
    pub component: &'a T,
}

impl<'a, T> ComponentEntry<'a, T> {
    /// The owner's Transform
    pub fn transform(&self) -> &'a Transform {
        self.game_object.transform()
    }
}

/// Owner of the live gameobject set
pub struct SceneManager {
    objects: SlotMap<GameObjectId, GameObject>,
    order: Vec<GameObjectId>,
    config: SceneConfig,
    stats: SceneStats,
}

impl SceneManager {
    /// Create a scene manager with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a scene manager with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
            config,
            stats: SceneStats::default(),
        }
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Statistics for the most recent frame
    pub fn stats(&self) -> &SceneStats {
        &self.stats
    }

    /// Instantiate every configured default prefab
    ///
    /// Prefabs that fail to load are logged and skipped.
    pub fn spawn_default_objects(&mut self, resources: &mut ResourceManager) -> Vec<GameObjectId> {
        let mut spawned = Vec::new();
        for path in self.config.default_prefabs.clone() {
            let result = resources
                .load::<Prefab>(path.as_str())
                .map_err(SceneError::from)
                .and_then(|prefab| self.create_game_object_from_prefab(&prefab, resources));
            match result {
                Ok(id) => spawned.push(id),
                Err(err) => warn!("Skipping default prefab '{path}': {err}"),
            }
        }
        info!("Spawned {} default gameobject(s)", spawned.len());
        spawned
    }

    /// Create a gameobject holding only a Transform and append it to the live set
    ///
    /// A stale `parent` handle is ignored with a warning.
    pub fn create_game_object(&mut self, name: impl Into<String>, parent: Option<GameObjectId>) -> GameObjectId {
        let mut game_object = GameObject::new(name);
        if let Some(parent) = parent {
            if self.objects.contains_key(parent) {
                game_object.transform_mut().set_parent(Some(parent));
            } else {
                warn!("Ignoring stale parent {parent:?} for '{}'", game_object.name());
            }
        }
        let id = self.insert(game_object);
        debug!("Created gameobject {id:?}");
        id
    }

    /// Create a gameobject with one extra component, by tag
    ///
    /// Backs the editor's "new gameobject" menu. Nothing is created when the
    /// tag is unknown.
    pub fn create_game_object_with(
        &mut self,
        name: impl Into<String>,
        tag: &str,
        parent: Option<GameObjectId>,
    ) -> Result<GameObjectId, SceneError> {
        if ComponentKind::from_tag(tag).is_none() {
            return Err(ComponentError::UnknownComponentType(tag.to_string()).into());
        }
        let id = self.create_game_object(name, parent);
        self.get_mut(id)
            .ok_or(SceneError::StaleHandle(id))?
            .create_component_by_tag(tag)?;
        Ok(id)
    }

    /// Instantiate a prefab and append the instance to the live set
    pub fn create_game_object_from_prefab(
        &mut self,
        prefab: &ResourceHandle<Prefab>,
        resources: &mut ResourceManager,
    ) -> Result<GameObjectId, SceneError> {
        let instance = prefab.borrow().instantiate(resources)?;
        let id = self.insert(instance);
        info!("Instantiated prefab '{}' as {id:?}", prefab.id());
        Ok(id)
    }

    /// Remove a gameobject from the live set, handing it back detached
    pub fn destroy_game_object(&mut self, id: GameObjectId) -> Option<GameObject> {
        let mut game_object = self.objects.remove(id)?;
        self.order.retain(|live| *live != id);
        game_object.set_id(None);
        debug!("Destroyed gameobject '{}' ({id:?})", game_object.name());
        Some(game_object)
    }

    /// Destroy every gameobject
    pub fn clear(&mut self) {
        self.objects.clear();
        self.order.clear();
    }

    /// Gameobject by handle
    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Gameobject by handle, mutably
    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Whether the handle refers to a live gameobject
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of live gameobjects
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the live set is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live handles in update order
    pub fn ids(&self) -> &[GameObjectId] {
        &self.order
    }

    /// Live gameobjects in update order
    pub fn iter(&self) -> impl Iterator<Item = (GameObjectId, &GameObject)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.objects.get(*id).map(|game_object| (*id, game_object)))
    }

    /// Update every live gameobject once, in live-set order
    pub fn frame_start(&mut self, delta_time: f32) {
        let stopwatch = Stopwatch::start_new();
        let snapshot = self.snapshot();

        for id in &self.order {
            if let Some(game_object) = self.objects.get_mut(*id) {
                game_object.update(delta_time, &snapshot);
            }
        }

        self.stats.game_object_count = self.order.len();
        self.stats.component_count = self.objects.values().map(|go| go.components().len()).sum();
        self.stats.frame_count += 1;
        self.stats.update_time_us = stopwatch.elapsed().as_micros() as u64;
        trace!(
            "Frame {} updated {} gameobject(s) in {}us",
            self.stats.frame_count,
            self.stats.game_object_count,
            self.stats.update_time_us
        );
    }

    /// World positions of every live gameobject
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut snapshot = SceneSnapshot::new();
        for &id in &self.order {
            if let Some(matrix) = self.world_matrix(id) {
                snapshot.insert(id, Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]));
            }
        }
        snapshot
    }

    /// Local-to-world matrix including the parent chain
    ///
    /// A parent that no longer exists ends the chain, as if the gameobject
    /// were a root.
    pub fn world_matrix(&self, id: GameObjectId) -> Option<Mat4> {
        let mut current = self.objects.get(id)?;
        let mut matrix = *current.transform().local_to_world();
        let mut depth = 0;

        while let Some(parent_id) = current.transform().parent() {
            let Some(parent) = self.objects.get(parent_id) else {
                break;
            };
            depth += 1;
            if depth > self.objects.len() {
                warn!("Parent cycle detected at {id:?}");
                break;
            }
            matrix = parent.transform().local_to_world() * matrix;
            current = parent;
        }
        Some(matrix)
    }

    /// Every live component of type `T`, in live-set order
    pub fn components<T: Component>(&self) -> Vec<ComponentEntry<'_, T>> {
        self.iter()
            .filter_map(|(id, game_object)| {
                game_object
                    .find_component::<T>()
                    .map(|component| ComponentEntry { id, game_object, component })
            })
            .collect()
    }

    /// First live camera
    pub fn main_camera(&self) -> Option<ComponentEntry<'_, Camera>> {
        self.iter().find_map(|(id, game_object)| {
            game_object
                .find_component::<Camera>()
                .map(|component| ComponentEntry { id, game_object, component })
        })
    }

    /// Every live static mesh
    pub fn static_meshes(&self) -> Vec<ComponentEntry<'_, StaticMesh>> {
        self.components()
    }

    /// Every live terrain
    pub fn terrains(&self) -> Vec<ComponentEntry<'_, Terrain>> {
        self.components()
    }

    /// First live gameobject with `name`
    pub fn find_by_name(&self, name: &str) -> Option<GameObjectId> {
        self.iter()
            .find(|(_, game_object)| game_object.name() == name)
            .map(|(id, _)| id)
    }

    /// Copy the live set into a scene document
    pub fn capture_scene(&self, scene: &mut Scene) {
        let game_objects = self
            .iter()
            .map(|(_, game_object)| {
                let mut copy = game_object.clone();
                copy.set_id(None);
                copy
            })
            .collect();
        scene.set_game_objects(game_objects);
        info!("Captured {} gameobject(s) into scene '{}'", self.len(), scene.id());
    }

    /// Replace the live set with copies of a scene's gameobjects
    pub fn load_scene(&mut self, scene: &Scene, resources: &mut ResourceManager) -> Result<Vec<GameObjectId>, SceneError> {
        let mut copies = Vec::with_capacity(scene.game_objects().len());
        for template in scene.game_objects() {
            let table = Table::write(template);
            let mut copy = GameObject::new(template.name());
            table.read_into(&mut copy, resources)?;
            copies.push(copy);
        }

        self.clear();
        let ids: Vec<_> = copies.into_iter().map(|copy| self.insert(copy)).collect();
        info!("Loaded scene '{}' ({} gameobject(s))", scene.id(), ids.len());
        Ok(ids)
    }

    fn insert(&mut self, mut game_object: GameObject) -> GameObjectId {
        let id = self.objects.insert_with_key(|id| {
            game_object.set_id(Some(id));
            game_object
        });
        self.order.push(id);
        id
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Helicopter;
    use approx::assert_relative_eq;

    #[test]
    fn test_scene_manager_creation() {
        let scene = SceneManager::new();
        assert!(scene.is_empty());
        assert_eq!(scene.stats().frame_count, 0);
        assert!(scene.main_camera().is_none());
    }

    #[test]
    fn test_create_and_destroy() {
        let mut scene = SceneManager::new();
        let id = scene.create_game_object("Empty", None);
        assert_eq!(scene.get(id).unwrap().id(), Some(id));

        let detached = scene.destroy_game_object(id).unwrap();
        assert!(detached.id().is_none());
        assert!(!scene.contains(id));
        assert!(scene.destroy_game_object(id).is_none());
    }

    #[test]
    fn test_stale_handle_never_resolves_again() {
        let mut scene = SceneManager::new();
        let old = scene.create_game_object("Old", None);
        scene.destroy_game_object(old);
        let new = scene.create_game_object("New", None);

        assert_ne!(old, new);
        assert!(scene.get(old).is_none());
        assert_eq!(scene.get(new).unwrap().name(), "New");
    }

    #[test]
    fn test_create_with_tag() {
        let mut scene = SceneManager::new();
        let id = scene.create_game_object_with("Camera", "Camera", None).unwrap();
        assert!(scene.get(id).unwrap().has_component::<Camera>());

        assert!(matches!(
            scene.create_game_object_with("Bad", "Rigidbody", None),
            Err(SceneError::Component(ComponentError::UnknownComponentType(_)))
        ));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_queries_follow_live_order() {
        let mut scene = SceneManager::new();
        scene.create_game_object("Root", None);
        let first = scene.create_game_object_with("Cam A", "Camera", None).unwrap();
        let second = scene.create_game_object_with("Cam B", "Camera", None).unwrap();
        scene.create_game_object_with("Rock", "StaticMesh", None).unwrap();

        assert_eq!(scene.main_camera().unwrap().id, first);
        let cameras: Vec<_> = scene.components::<Camera>().iter().map(|e| e.id).collect();
        assert_eq!(cameras, vec![first, second]);
        assert_eq!(scene.static_meshes().len(), 1);
        assert!(scene.terrains().is_empty());
        assert_eq!(scene.find_by_name("Cam B"), Some(second));
    }

    #[test]
    fn test_world_matrix_follows_parent() {
        let mut scene = SceneManager::new();
        let parent = scene.create_game_object("Parent", None);
        let child = scene.create_game_object("Child", Some(parent));

        scene.get_mut(parent).unwrap().transform_mut().set_position_local(Vec3::new(10.0, 0.0, 0.0));
        scene.get_mut(child).unwrap().transform_mut().set_position_local(Vec3::new(0.0, 5.0, 0.0));

        let snapshot = scene.snapshot();
        assert_relative_eq!(snapshot.position(child).unwrap(), Vec3::new(10.0, 5.0, 0.0));

        // Destroying the parent turns the child into a root
        scene.destroy_game_object(parent);
        assert_relative_eq!(scene.snapshot().position(child).unwrap(), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_stale_parent_ignored() {
        let mut scene = SceneManager::new();
        let parent = scene.create_game_object("Parent", None);
        scene.destroy_game_object(parent);

        let child = scene.create_game_object("Child", Some(parent));
        assert!(scene.get(child).unwrap().transform().parent().is_none());
    }

    #[test]
    fn test_frame_start_updates_and_records_stats() {
        let mut scene = SceneManager::new();
        let heli = scene.create_game_object_with("Heli", "Helicopter", None).unwrap();
        scene
            .get_mut(heli)
            .unwrap()
            .find_component_mut::<Helicopter>()
            .unwrap()
            .set_throttle(1.0);

        scene.frame_start(0.5);
        scene.frame_start(0.5);

        assert!(scene.get(heli).unwrap().transform().position_local().z < 0.0);
        assert_eq!(scene.stats().frame_count, 2);
        assert_eq!(scene.stats().game_object_count, 1);
        assert_eq!(scene.stats().component_count, 2);
    }

    #[test]
    fn test_missing_default_prefabs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = ResourceManager::with_root(dir.path());
        let mut scene = SceneManager::new();

        assert!(scene.spawn_default_objects(&mut resources).is_empty());
        assert!(scene.is_empty());
    }
}
