//! Insertion-ordered property table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{SerializationError, SerializedObject, TableReader, TableWriter, Value};
use crate::assets::ResourceManager;

/// String-keyed map of [`Value`]s that remembers insertion order
///
/// Order matters for component reconciliation: components are created in the
/// order their keys appear, so documents written by hand read back predictably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    entries: IndexMap<String, Value>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value under the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Nested table stored under `key`, if that key holds a table
    pub fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(Value::as_table)
    }

    /// Remove `key`, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capture an object's persisted state
    ///
    /// Serialization takes `&mut self` on the object, so a scratch copy is
    /// written and `value` itself is left untouched.
    pub fn write<T: SerializedObject + Clone>(value: &T) -> Table {
        let mut scratch = value.clone();
        let mut writer = TableWriter::new();
        scratch.serialize(&mut writer);
        writer.finish()
    }

    /// Reconcile `target` to this table
    ///
    /// Every field is assigned: missing keys and mismatched values fall back to
    /// defaults. The first mismatch is returned as an error after the whole
    /// read has completed, so `target` is always left in a usable state.
    pub fn read_into<T: SerializedObject>(
        &self,
        target: &mut T,
        resources: &mut ResourceManager,
    ) -> Result<(), SerializationError> {
        let mut reader = TableReader::new(self, resources);
        target.serialize(&mut reader);
        reader.finish()
    }

    /// Build a fresh object from this table
    pub fn read<T: SerializedObject + Default>(
        &self,
        resources: &mut ResourceManager,
    ) -> Result<T, SerializationError> {
        let mut value = T::default();
        self.read_into(&mut value, resources)?;
        Ok(value)
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = Table::new();
        table.insert("zeta", Value::Int(1));
        table.insert("alpha", Value::Int(2));
        table.insert("mid", Value::Int(3));

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = Table::new();
        table.insert("a", Value::Int(1));
        table.insert("b", Value::Int(2));

        assert_eq!(table.insert("a", Value::Bool(true)), Some(Value::Int(1)));
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.get("a"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_remove() {
        let mut table: Table = [
            ("a".to_string(), Value::Null),
            ("b".to_string(), Value::Int(4)),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.remove("a"), Some(Value::Null));
        assert_eq!(table.remove("a"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_keys() {
        let mut table: Table = ["a", "b", "c", "d"]
            .into_iter()
            .map(|key| (key.to_string(), Value::Null))
            .collect();

        table.remove("b");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_ron_preserves_order() {
        let mut table = Table::new();
        table.insert("Transform", Value::Table(Table::new()));
        table.insert("Camera", Value::Table(Table::new()));
        table.insert("Helicopter", Value::Table(Table::new()));

        let text = ron::to_string(&table).unwrap();
        let parsed: Table = ron::from_str(&text).unwrap();

        assert_eq!(
            parsed.keys().collect::<Vec<_>>(),
            vec!["Transform", "Camera", "Helicopter"]
        );
    }
}
