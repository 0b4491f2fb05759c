//! Texture resource

use super::{Resource, ResourceId};
use crate::serialization::{PropertyTable, SerializedObject};

/// Image reference plus sampling options
///
/// Pixel data is owned by whichever renderer consumes the scene; this
/// document only records where the image lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: ResourceId,
    source: String,
    generate_mipmaps: bool,
}

impl Texture {
    /// Document id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Image file path
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Set the image file path
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Whether a mip chain should be generated on upload
    pub fn generate_mipmaps(&self) -> bool {
        self.generate_mipmaps
    }

    /// Enable or disable mip generation
    pub fn set_generate_mipmaps(&mut self, enabled: bool) {
        self.generate_mipmaps = enabled;
    }
}

impl SerializedObject for Texture {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("source", &mut self.source, String::new());
        table.property("generate_mipmaps", &mut self.generate_mipmaps, true);
    }
}

impl Resource for Texture {
    const TYPE_NAME: &'static str = "Texture";

    fn new(id: ResourceId) -> Self {
        Self {
            id,
            source: String::new(),
            generate_mipmaps: true,
        }
    }
}
