//! Scene resource: a persisted list of gameobjects

use super::{Resource, ResourceId};
use crate::ecs::GameObject;
use crate::editor::Inspector;
use crate::serialization::{PropertyTable, SerializedObject};

/// Ordered gameobjects saved as one document
///
/// A scene is inert storage; `SceneManager::load_scene` copies it into the
/// live set and `SceneManager::capture_scene` copies the live set back.
#[derive(Debug, Clone)]
pub struct Scene {
    id: ResourceId,
    game_objects: Vec<GameObject>,
}

impl Scene {
    /// Document id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Stored gameobjects, in live-set order
    pub fn game_objects(&self) -> &[GameObject] {
        &self.game_objects
    }

    /// Replace the stored gameobjects
    pub fn set_game_objects(&mut self, game_objects: Vec<GameObject>) {
        self.game_objects = game_objects;
    }
}

impl SerializedObject for Scene {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.objects("gameobjects", &mut self.game_objects);
    }
}

impl Resource for Scene {
    const TYPE_NAME: &'static str = "Scene";

    fn new(id: ResourceId) -> Self {
        Self {
            id,
            game_objects: Vec::new(),
        }
    }

    fn draw_editor(&mut self, ui: &mut dyn Inspector) {
        ui.text(&format!("Scene contains {} gameobjects", self.game_objects.len()));
    }
}
