//! Material resource

use super::{Resource, ResourceHandle, ResourceId, Texture};
use crate::foundation::math::{Color, Vec4};
use crate::serialization::{PropertyTable, SerializedObject};

/// Default shader assigned to new materials
pub const DEFAULT_SHADER: &str = "Shaders/Standard.shader";

/// Shader, base colour and an optional albedo texture
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    id: ResourceId,
    shader: String,
    color: Color,
    texture: Option<ResourceHandle<Texture>>,
}

impl Material {
    /// Document id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Shader path
    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// Set the shader path
    pub fn set_shader(&mut self, shader: impl Into<String>) {
        self.shader = shader.into();
    }

    /// Base colour (linear RGBA)
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the base colour
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Albedo texture
    pub fn texture(&self) -> Option<&ResourceHandle<Texture>> {
        self.texture.as_ref()
    }

    /// Replace the albedo texture
    pub fn set_texture(&mut self, texture: Option<ResourceHandle<Texture>>) {
        self.texture = texture;
    }
}

impl SerializedObject for Material {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("shader", &mut self.shader, DEFAULT_SHADER.to_string());
        table.property("color", &mut self.color, Vec4::new(1.0, 1.0, 1.0, 1.0));
        table.resource("texture", &mut self.texture);
    }
}

impl Resource for Material {
    const TYPE_NAME: &'static str = "Material";

    fn new(id: ResourceId) -> Self {
        Self {
            id,
            shader: DEFAULT_SHADER.to_string(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            texture: None,
        }
    }
}
