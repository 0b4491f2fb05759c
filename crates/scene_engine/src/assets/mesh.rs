//! Mesh resource

use super::{Resource, ResourceId};
use crate::serialization::{PropertyTable, SerializedObject};

/// Reference to model geometry on disk, with import settings
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    id: ResourceId,
    source: String,
    import_scale: f32,
}

impl Mesh {
    /// Document id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Model file path (e.g. an OBJ file)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Set the model file path
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Uniform scale applied to vertices at import
    pub fn import_scale(&self) -> f32 {
        self.import_scale
    }

    /// Set the import scale
    pub fn set_import_scale(&mut self, scale: f32) {
        self.import_scale = scale;
    }
}

impl SerializedObject for Mesh {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("source", &mut self.source, String::new());
        table.property("import_scale", &mut self.import_scale, 1.0);
    }
}

impl Resource for Mesh {
    const TYPE_NAME: &'static str = "Mesh";

    fn new(id: ResourceId) -> Self {
        Self {
            id,
            source: String::new(),
            import_scale: 1.0,
        }
    }
}
