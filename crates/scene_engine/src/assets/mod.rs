//! Persisted resources
//!
//! Prefabs, scenes, materials and the other documents a scene refers to are
//! loaded through the [`ResourceManager`] and shared by [`ResourceHandle`].

pub mod material;
pub mod mesh;
pub mod prefab;
pub mod resource_manager;
pub mod scene;
pub mod texture;

pub use material::Material;
pub use mesh::Mesh;
pub use prefab::Prefab;
pub use resource_manager::{ResourceError, ResourceManager};
pub use scene::Scene;
pub use texture::Texture;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::editor::Inspector;
use crate::serialization::SerializedObject;

/// Path of a resource document, relative to the asset root
///
/// Separators are normalized to `/` so the same document is never cached
/// twice under different spellings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create an id from a relative path
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = path.as_ref().replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./");
        Self(trimmed.to_string())
    }

    /// Path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension, if any
    pub fn extension(&self) -> Option<&str> {
        let file = self.0.rsplit('/').next()?;
        file.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ResourceId {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

/// A persisted document type managed by the [`ResourceManager`]
pub trait Resource: SerializedObject + Clone + 'static {
    /// Human readable type name used in logs and errors
    const TYPE_NAME: &'static str;

    /// Create an empty resource for `id`, ready to be read into
    fn new(id: ResourceId) -> Self;

    /// Editor panel shown when the resource is selected
    fn draw_editor(&mut self, _ui: &mut dyn Inspector) {}
}

/// Shared reference to a loaded resource
///
/// Cloning is cheap and every clone sees the same instance. Equality is
/// identity: two handles are equal only if they point at the same instance.
pub struct ResourceHandle<T> {
    id: ResourceId,
    inner: Rc<RefCell<T>>,
}

impl<T> ResourceHandle<T> {
    pub(crate) fn from_shared(id: ResourceId, inner: Rc<RefCell<T>>) -> Self {
        Self { id, inner }
    }

    /// Path this resource was loaded from
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Borrow the resource
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Mutably borrow the resource
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Whether both handles refer to the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles, including the manager's cache entry
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceHandle").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_normalization() {
        assert_eq!(ResourceId::new("Prefabs\\Camera.prefab"), ResourceId::new("Prefabs/Camera.prefab"));
        assert_eq!(ResourceId::new("./Materials/a.material").as_str(), "Materials/a.material");
    }

    #[test]
    fn test_extension() {
        assert_eq!(ResourceId::new("Prefabs/Camera.prefab").extension(), Some("prefab"));
        assert_eq!(ResourceId::new("dir.d/README").extension(), None);
    }
}
