//! Prefab resource
//!
//! A prefab owns one template [`GameObject`]. The template is never part of
//! the live set: it is not updated, has no handle, and never carries a prefab
//! link of its own. Both directions copy through a property table, so the
//! template and any live object never share component instances.

use log::info;

use super::{Resource, ResourceId, ResourceManager};
use crate::ecs::GameObject;
use crate::editor::Inspector;
use crate::serialization::{PropertyTable, SerializationError, SerializedObject, Table};

const GAME_OBJECT_KEY: &str = "gameobject";

/// A persisted template gameobject that live objects are stamped from
#[derive(Debug, Clone)]
pub struct Prefab {
    id: ResourceId,
    game_object: GameObject,
}

impl Prefab {
    /// Document id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// The template gameobject
    pub fn template(&self) -> &GameObject {
        &self.game_object
    }

    /// Overwrite the template with a structural copy of `source`
    ///
    /// Any prior template content is replaced: components `source` does not
    /// have are removed from the template.
    pub fn clone_game_object(
        &mut self,
        source: &GameObject,
        resources: &mut ResourceManager,
    ) -> Result<(), SerializationError> {
        let table = Table::write(source);
        let result = table.read_into(&mut self.game_object, resources);
        self.game_object.set_prefab(None);
        info!("Prefab '{}' now templates '{}'", self.id, source.name());
        result
    }

    /// Build a new, unparented gameobject from the template
    ///
    /// The instance is linked back to this prefab; it is not added to any
    /// scene.
    pub fn instantiate(&self, resources: &mut ResourceManager) -> Result<GameObject, SerializationError> {
        let table = Table::write(&self.game_object);
        let mut instance = GameObject::new(self.game_object.name());
        table.read_into(&mut instance, resources)?;
        instance.set_prefab(Some(self.id.clone()));
        Ok(instance)
    }
}

impl SerializedObject for Prefab {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.object(GAME_OBJECT_KEY, &mut self.game_object);
        if table.is_reading() {
            self.game_object.set_prefab(None);
        }
    }
}

impl Resource for Prefab {
    const TYPE_NAME: &'static str = "Prefab";

    fn new(id: ResourceId) -> Self {
        Self {
            id,
            game_object: GameObject::default(),
        }
    }

    /// Edits the template in place; instances pick up changes when next
    /// instantiated
    fn draw_editor(&mut self, ui: &mut dyn Inspector) {
        ui.text(&format!("Prefab: {}", self.id));
        self.game_object.draw_properties(ui);
    }
}
