//! Bidirectional property serialization
//!
//! Every persisted type implements [`SerializedObject`] with a single
//! `serialize` routine that describes its fields once. The same routine runs
//! against a [`TableWriter`] to capture state and against a [`TableReader`]
//! to apply state, so the two directions cannot drift apart.
//!
//! ```ignore
//! impl SerializedObject for Camera {
//!     fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
//!         table.property("near_plane", &mut self.near_plane, 0.1);
//!         table.property("far_plane", &mut self.far_plane, 10000.0);
//!     }
//! }
//! ```

pub mod document;
mod error;
mod reader;
mod table;
mod value;
mod writer;

pub use error::SerializationError;
pub use reader::TableReader;
pub use table::Table;
pub use value::{PropertyValue, Value};
pub use writer::TableWriter;

use crate::assets::{Resource, ResourceHandle};

/// Direction a [`PropertyTable`] is operating in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Table values are assigned to the object
    Reading,
    /// Object values are captured into the table
    Writing,
}

/// One scope of a property table, in either direction
///
/// In reading mode every call assigns the target: the stored value when the
/// key is present and well-formed, the supplied default otherwise. In writing
/// mode every call records the current value under its key.
pub trait PropertyTable: Sized {
    /// Direction of this table
    fn mode(&self) -> TableMode;

    /// Whether values flow from the table into the object
    fn is_reading(&self) -> bool {
        self.mode() == TableMode::Reading
    }

    /// Read or write a single value
    fn property<T: PropertyValue>(&mut self, key: &str, value: &mut T, default: T);

    /// Enter the nested table under `key` for the duration of `f`
    ///
    /// When reading a missing key, `f` still runs against an empty table so
    /// every nested field is reset to its default.
    fn subtable<F>(&mut self, key: &str, f: F)
    where
        F: FnOnce(&mut Self);

    /// Read or write a nested object under `key`
    fn object<T: SerializedObject>(&mut self, key: &str, object: &mut T) {
        self.subtable(key, |table| object.serialize(table));
    }

    /// Read or write an ordered list of nested objects
    ///
    /// Reading resizes `items` to the stored length, reusing existing
    /// elements in place and default-constructing new ones.
    fn objects<T: SerializedObject + Default>(&mut self, key: &str, items: &mut Vec<T>);

    /// Read or write a reference to a persisted resource
    fn resource<T: Resource>(&mut self, key: &str, handle: &mut Option<ResourceHandle<T>>);

    /// Keys present in the current scope
    fn property_names(&self) -> Vec<String>;
}

/// A type whose state can be captured into and applied from a property table
pub trait SerializedObject {
    /// Describe this object's persisted fields
    fn serialize<P: PropertyTable>(&mut self, table: &mut P);
}
