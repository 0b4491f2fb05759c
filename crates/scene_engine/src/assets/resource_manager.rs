//! Resource Manager - loading, caching and saving of resource documents
//!
//! Each document is loaded at most once; later requests for the same
//! [`ResourceId`] share the cached instance. Storage is type-erased and
//! recovered by downcasting, so one cache serves every [`Resource`] type.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info, warn};
use thiserror::Error;

use super::{Resource, ResourceHandle, ResourceId};
use crate::core::config::AssetConfig;
use crate::serialization::{document, SerializationError, Table};

/// Resource loading errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No document exists at the resolved path
    #[error("Resource '{id}' not found at {path:?}")]
    NotFound {
        /// Requested id
        id: ResourceId,
        /// Resolved file path
        path: PathBuf,
    },

    /// The id is already cached as a different resource type
    #[error("Resource '{id}' is a {found}, not a {expected}")]
    TypeMismatch {
        /// Requested id
        id: ResourceId,
        /// Requested type
        expected: &'static str,
        /// Cached type
        found: &'static str,
    },

    /// The document (indirectly) references itself
    #[error("Resource '{0}' references itself while loading")]
    LoadCycle(ResourceId),

    /// Reading or writing the document failed
    #[error("Document error: {0}")]
    Serialization(#[from] SerializationError),
}

struct CacheEntry {
    type_name: &'static str,
    value: Rc<dyn Any>,
}

/// Loads resource documents from an asset root and caches them by id
pub struct ResourceManager {
    root: PathBuf,
    cache: HashMap<ResourceId, CacheEntry>,
    loading: Vec<ResourceId>,
}

impl ResourceManager {
    /// Create a manager rooted at the configured assets directory
    pub fn new(config: &AssetConfig) -> Self {
        Self::with_root(&config.assets_dir)
    }

    /// Create a manager rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
            loading: Vec::new(),
        }
    }

    /// Asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a resource id resolves to
    pub fn path_of(&self, id: &ResourceId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Number of cached resources
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Whether `id` is cached
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.cache.contains_key(id)
    }

    /// Cached resource for `id`, without touching disk
    pub fn get<T: Resource>(&self, id: &ResourceId) -> Result<Option<ResourceHandle<T>>, ResourceError> {
        let Some(entry) = self.cache.get(id) else {
            return Ok(None);
        };
        Rc::clone(&entry.value)
            .downcast::<RefCell<T>>()
            .map(|inner| Some(ResourceHandle::from_shared(id.clone(), inner)))
            .map_err(|_| ResourceError::TypeMismatch {
                id: id.clone(),
                expected: T::TYPE_NAME,
                found: entry.type_name,
            })
    }

    /// Load a resource document, or return the cached instance
    ///
    /// Malformed fields inside an otherwise readable document are logged and
    /// defaulted; only a missing or unparsable document fails the load.
    pub fn load<T: Resource>(&mut self, id: impl Into<ResourceId>) -> Result<ResourceHandle<T>, ResourceError> {
        let id = id.into();
        if let Some(handle) = self.get::<T>(&id)? {
            return Ok(handle);
        }
        if self.loading.contains(&id) {
            return Err(ResourceError::LoadCycle(id));
        }

        let path = self.path_of(&id);
        if !path.is_file() {
            return Err(ResourceError::NotFound { id, path });
        }
        let table = document::read_file(&path)?;

        self.loading.push(id.clone());
        let mut resource = T::new(id.clone());
        let result = table.read_into(&mut resource, self);
        self.loading.retain(|pending| pending != &id);

        if let Err(err) = result {
            warn!("{} '{}' loaded with errors: {}", T::TYPE_NAME, id, err);
        }
        info!("Loaded {} '{}'", T::TYPE_NAME, id);
        Ok(self.insert(id, resource))
    }

    /// Register a new in-memory resource, or return the cached one for `id`
    pub fn create_resource<T: Resource>(&mut self, id: impl Into<ResourceId>) -> Result<ResourceHandle<T>, ResourceError> {
        let id = id.into();
        if let Some(handle) = self.get::<T>(&id)? {
            return Ok(handle);
        }
        debug!("Created {} '{}'", T::TYPE_NAME, id);
        Ok(self.insert(id.clone(), T::new(id)))
    }

    /// Write a resource back to its document
    pub fn save<T: Resource>(&self, handle: &ResourceHandle<T>) -> Result<(), ResourceError> {
        let table = Table::write(&*handle.borrow());
        let path = self.path_of(handle.id());
        document::write_file(&path, &table)?;
        info!("Saved {} '{}' to {:?}", T::TYPE_NAME, handle.id(), path);
        Ok(())
    }

    /// Drop the cached instance for `id`; outstanding handles stay valid
    pub fn unload(&mut self, id: &ResourceId) -> bool {
        self.cache.remove(id).is_some()
    }

    /// Drop every cached resource no handle refers to any more
    pub fn unload_unused(&mut self) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, entry| Rc::strong_count(&entry.value) > 1);
        let removed = before - self.cache.len();
        if removed > 0 {
            debug!("Unloaded {removed} unused resource(s)");
        }
        removed
    }

    fn insert<T: Resource>(&mut self, id: ResourceId, resource: T) -> ResourceHandle<T> {
        let inner = Rc::new(RefCell::new(resource));
        let value: Rc<dyn Any> = inner.clone();
        self.cache.insert(
            id.clone(),
            CacheEntry {
                type_name: T::TYPE_NAME,
                value,
            },
        );
        ResourceHandle::from_shared(id, inner)
    }
}
