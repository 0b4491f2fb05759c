//! Static mesh component

use crate::assets::{Material, Mesh, ResourceHandle};
use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentKind};
use crate::editor::Inspector;
use crate::serialization::{PropertyTable, SerializedObject};

/// Renders a mesh with a material at the owner's transform
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMesh {
    mesh: Option<ResourceHandle<Mesh>>,
    material: Option<ResourceHandle<Material>>,
    visible: bool,
}

impl Default for StaticMesh {
    fn default() -> Self {
        Self {
            mesh: None,
            material: None,
            visible: true,
        }
    }
}

impl StaticMesh {
    /// Geometry to draw
    pub fn mesh(&self) -> Option<&ResourceHandle<Mesh>> {
        self.mesh.as_ref()
    }

    /// Replace the geometry
    pub fn set_mesh(&mut self, mesh: Option<ResourceHandle<Mesh>>) {
        self.mesh = mesh;
    }

    /// Surface material
    pub fn material(&self) -> Option<&ResourceHandle<Material>> {
        self.material.as_ref()
    }

    /// Replace the material
    pub fn set_material(&mut self, material: Option<ResourceHandle<Material>>) {
        self.material = material;
    }

    /// Whether the mesh is drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the mesh
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether there is enough to draw
    pub fn is_renderable(&self) -> bool {
        self.visible && self.mesh.is_some() && self.material.is_some()
    }
}

impl SerializedObject for StaticMesh {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.resource("mesh", &mut self.mesh);
        table.resource("material", &mut self.material);
        table.property("visible", &mut self.visible, true);
    }
}

impl Component for StaticMesh {
    const KIND: ComponentKind = ComponentKind::StaticMesh;

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        let mesh = self.mesh.as_ref().map_or("<none>".to_string(), |m| m.id().to_string());
        ui.text(&format!("Mesh: {mesh}"));
        let material = self.material.as_ref().map_or("<none>".to_string(), |m| m.id().to_string());
        ui.text(&format!("Material: {material}"));
        ui.checkbox("Visible", &mut self.visible);
    }

    component_variant!(StaticMesh);
}
