//! Write-mode property table

use super::{PropertyTable, PropertyValue, SerializedObject, Table, TableMode, Value};
use crate::assets::{Resource, ResourceHandle};

/// Collects an object's fields into a [`Table`]
///
/// Nested scopes are kept on a stack and folded into their parent when the
/// scope closes.
#[derive(Debug, Default)]
pub struct TableWriter {
    root: Table,
    open: Vec<(String, Table)>,
}

impl TableWriter {
    /// Create a writer with an empty root table
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish writing and return the root table
    pub fn finish(mut self) -> Table {
        // Scopes are always closed by `subtable`, but fold any stragglers in
        while let Some((key, table)) = self.open.pop() {
            self.current().insert(key, Value::Table(table));
        }
        self.root
    }

    fn current(&mut self) -> &mut Table {
        match self.open.last_mut() {
            Some((_, table)) => table,
            None => &mut self.root,
        }
    }

    fn capture<T: SerializedObject>(&mut self, object: &mut T) -> Table {
        self.open.push((String::new(), Table::new()));
        object.serialize(self);
        self.open.pop().map(|(_, table)| table).unwrap_or_default()
    }
}

impl PropertyTable for TableWriter {
    fn mode(&self) -> TableMode {
        TableMode::Writing
    }

    fn property<T: PropertyValue>(&mut self, key: &str, value: &mut T, _default: T) {
        let value = value.to_value();
        self.current().insert(key, value);
    }

    fn subtable<F>(&mut self, key: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.open.push((key.to_string(), Table::new()));
        f(self);
        if let Some((key, table)) = self.open.pop() {
            self.current().insert(key, Value::Table(table));
        }
    }

    fn objects<T: SerializedObject + Default>(&mut self, key: &str, items: &mut Vec<T>) {
        let values = items
            .iter_mut()
            .map(|item| Value::Table(self.capture(item)))
            .collect();
        self.current().insert(key, Value::List(values));
    }

    fn resource<T: Resource>(&mut self, key: &str, handle: &mut Option<ResourceHandle<T>>) {
        let value = handle
            .as_ref()
            .map_or(Value::Null, |handle| Value::Resource(handle.id().clone()));
        self.current().insert(key, value);
    }

    fn property_names(&self) -> Vec<String> {
        let table = match self.open.last() {
            Some((_, table)) => table,
            None => &self.root,
        };
        table.keys().map(String::from).collect()
    }
}
