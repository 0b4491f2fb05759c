//! GameObject: a named, ordered set of components
//!
//! The first component is always the [`Transform`]; it is created with the
//! gameobject and can never be removed. Every other variant appears at most
//! once. Reading a table reconciles the component list in place:
//!
//! 1. components whose tag is missing from the table are removed
//!    (the Transform is kept and a warning is logged)
//! 2. every tag in the table is found or created, in table order, and the
//!    component reads its own sub-table
//!
//! Components that survive a read keep their identity and runtime state.

use log::{debug, error, warn};

use super::components::Transform;
use super::{AnyComponent, Component, ComponentContext, ComponentError, ComponentKind, GameObjectId, SceneSnapshot};
use crate::assets::ResourceId;
use crate::editor::Inspector;
use crate::serialization::{PropertyTable, SerializedObject};

/// Name given to gameobjects created without one
pub const DEFAULT_NAME: &str = "GameObject";

const COMPONENTS_KEY: &str = "components";

/// A scene entity made of components
#[derive(Debug, Clone)]
pub struct GameObject {
    id: Option<GameObjectId>,
    name: String,
    components: Vec<AnyComponent>,
    prefab: Option<ResourceId>,
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl GameObject {
    /// Create a gameobject holding only a default Transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            components: vec![AnyComponent::Transform(Transform::default())],
            prefab: None,
        }
    }

    /// Handle in the live set; `None` for templates and detached objects
    pub fn id(&self) -> Option<GameObjectId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: Option<GameObjectId>) {
        self.id = id;
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Prefab this gameobject was instantiated from
    pub fn prefab(&self) -> Option<&ResourceId> {
        self.prefab.as_ref()
    }

    /// Link to (or unlink from) a prefab
    pub fn set_prefab(&mut self, prefab: Option<ResourceId>) {
        self.prefab = prefab;
    }

    /// Forget the originating prefab; components are untouched
    pub fn break_prefab_link(&mut self) {
        if let Some(prefab) = self.prefab.take() {
            debug!("'{}' unlinked from prefab '{}'", self.name, prefab);
        }
    }

    /// Components in insertion order, Transform first
    pub fn components(&self) -> &[AnyComponent] {
        &self.components
    }

    /// Tags of all components in insertion order
    pub fn component_tags(&self) -> Vec<&'static str> {
        self.components.iter().map(AnyComponent::tag).collect()
    }

    /// The Transform
    pub fn transform(&self) -> &Transform {
        match self.components.first() {
            Some(AnyComponent::Transform(transform)) => transform,
            _ => unreachable!("gameobject '{}' lost its Transform", self.name),
        }
    }

    /// The Transform, mutably
    pub fn transform_mut(&mut self) -> &mut Transform {
        match self.components.first_mut() {
            Some(AnyComponent::Transform(transform)) => transform,
            _ => unreachable!("gameobject '{}' lost its Transform", self.name),
        }
    }

    /// Find the component of type `T`, creating a default one if absent
    pub fn create_component<T: Component>(&mut self) -> &mut T {
        let index = self.index_of(T::KIND).unwrap_or_else(|| {
            self.components.push(T::default().into_any());
            self.components.len() - 1
        });
        match T::from_any_mut(&mut self.components[index]) {
            Some(component) => component,
            None => unreachable!("component slot does not hold a {}", T::KIND),
        }
    }

    /// Find the component with `tag`, creating a default one if absent
    pub fn create_component_by_tag(&mut self, tag: &str) -> Result<&mut AnyComponent, ComponentError> {
        let Some(kind) = ComponentKind::from_tag(tag) else {
            error!("Cannot create component: unknown type '{tag}'");
            return Err(ComponentError::UnknownComponentType(tag.to_string()));
        };
        let index = self.index_of(kind).unwrap_or_else(|| {
            self.components.push(kind.create());
            self.components.len() - 1
        });
        Ok(&mut self.components[index])
    }

    /// The component of type `T`
    pub fn find_component<T: Component>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_any)
    }

    /// The component of type `T`, mutably
    pub fn find_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_any_mut)
    }

    /// The component with `tag`
    pub fn find_component_by_tag(&self, tag: &str) -> Option<&AnyComponent> {
        self.components.iter().find(|component| component.tag() == tag)
    }

    /// The component with `tag`, mutably
    pub fn find_component_by_tag_mut(&mut self, tag: &str) -> Option<&mut AnyComponent> {
        self.components.iter_mut().find(|component| component.tag() == tag)
    }

    /// Whether a component of type `T` exists
    pub fn has_component<T: Component>(&self) -> bool {
        self.index_of(T::KIND).is_some()
    }

    /// Remove and return the component of type `T`
    pub fn remove_component<T: Component>(&mut self) -> Result<Option<T>, ComponentError> {
        if T::KIND == ComponentKind::Transform {
            return Err(ComponentError::TransformRequired);
        }
        let Some(index) = self.index_of(T::KIND) else {
            return Ok(None);
        };
        Ok(T::try_from_any(self.components.remove(index)).ok())
    }

    /// Remove and return the component with `tag`
    pub fn remove_component_by_tag(&mut self, tag: &str) -> Result<Option<AnyComponent>, ComponentError> {
        let kind = ComponentKind::from_tag(tag)
            .ok_or_else(|| ComponentError::UnknownComponentType(tag.to_string()))?;
        if kind == ComponentKind::Transform {
            return Err(ComponentError::TransformRequired);
        }
        Ok(self.index_of(kind).map(|index| self.components.remove(index)))
    }

    /// Advance every component one frame, in sequence order
    pub fn update(&mut self, delta_time: f32, scene: &SceneSnapshot) {
        let owner = self.id;
        let Some((first, rest)) = self.components.split_first_mut() else {
            return;
        };
        let AnyComponent::Transform(transform) = first else {
            unreachable!("gameobject '{}' lost its Transform", self.name);
        };

        transform.update(delta_time, &mut ComponentContext::new(owner, None, scene));
        for component in rest {
            let mut ctx = ComponentContext::new(owner, Some(&mut *transform), scene);
            component.update(delta_time, &mut ctx);
        }
    }

    /// Draw the name field and every component's editor widgets
    pub fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        ui.edit_text("Name", &mut self.name);
        if let Some(prefab) = &self.prefab {
            ui.text(&format!("Prefab: {prefab}"));
            if ui.button("Break Prefab Link") {
                self.break_prefab_link();
            }
        }

        let mut remove = None;
        for component in &mut self.components {
            let tag = component.tag();
            if ui.collapsing_header(tag) {
                component.draw_properties(ui);
                if component.kind() != ComponentKind::Transform && ui.button(&format!("Remove {tag}")) {
                    remove = Some(component.kind());
                }
            }
        }
        if let Some(kind) = remove {
            self.components.retain(|component| component.kind() != kind);
        }
    }

    fn index_of(&self, kind: ComponentKind) -> Option<usize> {
        self.components.iter().position(|component| component.kind() == kind)
    }

    fn reconcile_components<P: PropertyTable>(&mut self, table: &mut P) {
        let tags = table.property_names();

        if !tags.iter().any(|tag| tag == ComponentKind::Transform.tag()) {
            warn!(
                "'{}': document has no Transform; keeping the current one",
                self.name
            );
        }

        let before = self.components.len();
        self.components.retain(|component| {
            component.kind() == ComponentKind::Transform || tags.iter().any(|tag| tag == component.tag())
        });
        if self.components.len() < before {
            debug!("'{}': removed {} component(s)", self.name, before - self.components.len());
        }

        // Unknown tags are logged by create_component_by_tag and skipped
        for tag in &tags {
            if let Ok(component) = self.create_component_by_tag(tag) {
                table.object(tag, component);
            }
        }
    }
}

impl SerializedObject for GameObject {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("name", &mut self.name, DEFAULT_NAME.to_string());
        table.property("prefab", &mut self.prefab, None);
        table.subtable(COMPONENTS_KEY, |components| {
            if components.is_reading() {
                self.reconcile_components(components);
            } else {
                for component in &mut self.components {
                    components.object(component.tag(), component);
                }
            }
        });
    }
}
