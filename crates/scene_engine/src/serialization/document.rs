//! Document persistence
//!
//! Tables are stored on disk as RON text. Only the storage format lives here;
//! the meaning of a document is decided by whatever object reads it.

use std::fs;
use std::path::Path;

use ron::ser::PrettyConfig;

use super::{SerializationError, Table};

/// Render a table as pretty-printed RON
pub fn to_string(table: &Table) -> Result<String, SerializationError> {
    ron::ser::to_string_pretty(table, PrettyConfig::default())
        .map_err(|e| SerializationError::Format(e.to_string()))
}

/// Parse RON text into a table
pub fn from_str(text: &str) -> Result<Table, SerializationError> {
    ron::from_str(text).map_err(|e| SerializationError::Parse(e.to_string()))
}

/// Read and parse a document file
pub fn read_file(path: impl AsRef<Path>) -> Result<Table, SerializationError> {
    let text = fs::read_to_string(path.as_ref())?;
    from_str(&text)
}

/// Write a table to a document file, creating parent directories as needed
pub fn write_file(path: impl AsRef<Path>, table: &Table) -> Result<(), SerializationError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_string(table)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::Value;

    #[test]
    fn test_parse_hand_written_document() {
        let text = r#"{
            "name": String("Camera"),
            "components": Table({
                "Transform": Table({
                    "Position": Vec3((0.0, 20.0, 60.0)),
                }),
            }),
        }"#;

        let table = from_str(text).unwrap();
        assert_eq!(table.get("name"), Some(&Value::String("Camera".into())));

        let transform = table
            .get_table("components")
            .and_then(|components| components.get_table("Transform"))
            .unwrap();
        assert_eq!(transform.get("Position"), Some(&Value::Vec3([0.0, 20.0, 60.0])));
    }

    #[test]
    fn test_parse_error_reported() {
        assert!(matches!(from_str("{ \"name\": "), Err(SerializationError::Parse(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Nested/dir/doc.prefab");

        let mut table = Table::new();
        table.insert("flag", Value::Bool(true));
        table.insert("items", Value::List(vec![Value::Int(1), Value::Null]));

        write_file(&path, &table).unwrap();
        assert_eq!(read_file(&path).unwrap(), table);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_file(dir.path().join("missing.prefab")),
            Err(SerializationError::Io(_))
        ));
    }
}
