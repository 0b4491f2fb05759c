//! Read-mode property table

use std::sync::OnceLock;

use log::warn;

use super::{PropertyTable, PropertyValue, SerializationError, SerializedObject, Table, TableMode, Value};
use crate::assets::{Resource, ResourceHandle, ResourceManager};

/// Shared stand-in for a missing or malformed sub-table
fn empty_table() -> &'static Table {
    static EMPTY: OnceLock<Table> = OnceLock::new();
    EMPTY.get_or_init(Table::new)
}

/// Assigns an object's fields from a [`Table`]
///
/// Reading never aborts: a missing key assigns the declared default, a value
/// of the wrong shape assigns the default and records a
/// [`SerializationError::TypeMismatch`]. Referenced resources are resolved
/// through the [`ResourceManager`].
pub struct TableReader<'a> {
    root: &'a Table,
    open: Vec<&'a Table>,
    path: Vec<String>,
    resources: &'a mut ResourceManager,
    errors: Vec<SerializationError>,
}

impl<'a> TableReader<'a> {
    /// Create a reader over `root`
    pub fn new(root: &'a Table, resources: &'a mut ResourceManager) -> Self {
        Self {
            root,
            open: Vec::new(),
            path: Vec::new(),
            resources,
            errors: Vec::new(),
        }
    }

    /// Resource manager used to resolve references
    pub fn resources(&mut self) -> &mut ResourceManager {
        self.resources
    }

    /// Errors recorded so far
    pub fn errors(&self) -> &[SerializationError] {
        &self.errors
    }

    /// Finish reading, reporting the first recorded error if any
    pub fn finish(self) -> Result<(), SerializationError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn current(&self) -> &'a Table {
        self.open.last().copied().unwrap_or(self.root)
    }

    fn full_key(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path.join("."), key)
        }
    }

    fn mismatch(&mut self, key: &str, expected: &'static str, found: &'static str) {
        let key = self.full_key(key);
        warn!("Property '{key}' expected {expected}, found {found}; using default");
        self.errors.push(SerializationError::TypeMismatch { key, expected, found });
    }

    fn scoped<F>(&mut self, name: String, table: &'a Table, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.open.push(table);
        self.path.push(name);
        f(self);
        self.path.pop();
        self.open.pop();
    }
}

impl PropertyTable for TableReader<'_> {
    fn mode(&self) -> TableMode {
        TableMode::Reading
    }

    fn property<T: PropertyValue>(&mut self, key: &str, value: &mut T, default: T) {
        *value = match self.current().get(key) {
            None => default,
            Some(raw) => match T::from_value(raw) {
                Some(parsed) => parsed,
                None => {
                    self.mismatch(key, T::TYPE_NAME, raw.kind());
                    default
                }
            },
        };
    }

    fn subtable<F>(&mut self, key: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let table = match self.current().get(key) {
            Some(Value::Table(table)) => table,
            None => empty_table(),
            Some(other) => {
                self.mismatch(key, "table", other.kind());
                empty_table()
            }
        };
        self.scoped(key.to_string(), table, f);
    }

    fn objects<T: SerializedObject + Default>(&mut self, key: &str, items: &mut Vec<T>) {
        let raw_items: &[Value] = match self.current().get(key) {
            Some(Value::List(list)) => list,
            None => &[],
            Some(other) => {
                self.mismatch(key, "list", other.kind());
                &[]
            }
        };

        items.truncate(raw_items.len());
        for (index, raw) in raw_items.iter().enumerate() {
            let name = format!("{key}[{index}]");
            let table = match raw {
                Value::Table(table) => table,
                other => {
                    self.mismatch(&name, "table", other.kind());
                    empty_table()
                }
            };
            if index == items.len() {
                items.push(T::default());
            }
            let item = &mut items[index];
            self.scoped(name, table, |reader| item.serialize(reader));
        }
    }

    fn resource<T: Resource>(&mut self, key: &str, handle: &mut Option<ResourceHandle<T>>) {
        match self.current().get(key) {
            None | Some(Value::Null) => *handle = None,
            Some(Value::Resource(id)) => {
                // Same reference: keep sharing the already resolved instance
                if handle.as_ref().is_some_and(|existing| existing.id() == id) {
                    return;
                }
                *handle = match self.resources.load::<T>(id.clone()) {
                    Ok(loaded) => Some(loaded),
                    Err(err) => {
                        warn!("Could not resolve {} '{}' for '{}': {}", T::TYPE_NAME, id, self.full_key(key), err);
                        None
                    }
                };
            }
            Some(other) => {
                self.mismatch(key, "resource", other.kind());
                *handle = None;
            }
        }
    }

    fn property_names(&self) -> Vec<String> {
        self.current().keys().map(String::from).collect()
    }
}
