//! Property values stored in a [`Table`]
//!
//! [`Value`] is the closed set of shapes a document can hold. [`PropertyValue`]
//! converts field types to and from it; a failed conversion is reported as a
//! type mismatch by the reader rather than a panic.

use serde::{Deserialize, Serialize};

use super::Table;
use crate::assets::ResourceId;
use crate::foundation::math::{Quat, Quaternion, Vec2, Vec3, Vec4};

/// A single value in a property table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Explicitly empty (e.g. an unset optional reference)
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Single precision float
    Float(f32),
    /// UTF-8 string
    String(String),
    /// 2 component vector
    Vec2([f32; 2]),
    /// 3 component vector
    Vec3([f32; 3]),
    /// 4 component vector, also used for quaternions (i, j, k, w) and colours
    Vec4([f32; 4]),
    /// Reference to another persisted resource, by path
    Resource(ResourceId),
    /// Ordered list of values
    List(Vec<Value>),
    /// Nested table
    Table(Table),
}

impl Value {
    /// Short name of this value's shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vec2(_) => "vec2",
            Value::Vec3(_) => "vec3",
            Value::Vec4(_) => "vec4",
            Value::Resource(_) => "resource",
            Value::List(_) => "list",
            Value::Table(_) => "table",
        }
    }

    /// Borrow as a nested table
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Borrow as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A field type that can be stored directly as a [`Value`]
pub trait PropertyValue: Sized {
    /// Name reported in type mismatch diagnostics
    const TYPE_NAME: &'static str;

    /// Convert to a document value
    fn to_value(&self) -> Value;

    /// Convert from a document value; `None` means the shape does not match
    fn from_value(value: &Value) -> Option<Self>;
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl PropertyValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl PropertyValue for i32 {
    const TYPE_NAME: &'static str = "int";

    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl PropertyValue for u32 {
    const TYPE_NAME: &'static str = "uint";

    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl PropertyValue for f32 {
    const TYPE_NAME: &'static str = "float";

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            // Hand-edited documents often drop the decimal point
            Value::Int(i) => Some(*i as f32),
            _ => None,
        }
    }
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl PropertyValue for Vec2 {
    const TYPE_NAME: &'static str = "vec2";

    fn to_value(&self) -> Value {
        Value::Vec2([self.x, self.y])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vec2([x, y]) => Some(Vec2::new(*x, *y)),
            _ => None,
        }
    }
}

impl PropertyValue for Vec3 {
    const TYPE_NAME: &'static str = "vec3";

    fn to_value(&self) -> Value {
        Value::Vec3([self.x, self.y, self.z])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vec3([x, y, z]) => Some(Vec3::new(*x, *y, *z)),
            _ => None,
        }
    }
}

impl PropertyValue for Vec4 {
    const TYPE_NAME: &'static str = "vec4";

    fn to_value(&self) -> Value {
        Value::Vec4([self.x, self.y, self.z, self.w])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vec4([x, y, z, w]) => Some(Vec4::new(*x, *y, *z, *w)),
            _ => None,
        }
    }
}

impl PropertyValue for Quat {
    const TYPE_NAME: &'static str = "quaternion";

    fn to_value(&self) -> Value {
        let c = self.coords;
        Value::Vec4([c.x, c.y, c.z, c.w])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vec4([i, j, k, w]) => {
                let raw = Quaternion::new(*w, *i, *j, *k);
                // A zero quaternion has no rotation to normalize to
                (raw.norm() > f32::EPSILON).then(|| Quat::from_quaternion(raw))
            }
            _ => None,
        }
    }
}

impl PropertyValue for ResourceId {
    const TYPE_NAME: &'static str = "resource";

    fn to_value(&self) -> Value {
        Value::Resource(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Resource(id) => Some(id.clone()),
            Value::String(path) => Some(ResourceId::new(path)),
            _ => None,
        }
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, PropertyValue::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_float_accepts_integer_literal() {
        assert_eq!(f32::from_value(&Value::Int(3)), Some(3.0));
        assert_eq!(f32::from_value(&Value::String("3".into())), None);
    }

    #[test]
    fn test_int_range_checked() {
        assert_eq!(i32::from_value(&Value::Int(i64::MAX)), None);
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(u32::from_value(&Value::Int(7)), Some(7));
    }

    #[test]
    fn test_quaternion_renormalized() {
        let q = Quat::from_value(&Value::Vec4([0.0, 2.0, 0.0, 0.0])).unwrap();
        assert_relative_eq!(q.coords.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(q.coords.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        assert!(Quat::from_value(&Value::Vec4([0.0; 4])).is_none());
    }

    #[test]
    fn test_optional_null() {
        assert_eq!(Option::<f32>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<f32>::from_value(&Value::Float(1.5)), Some(Some(1.5)));
        assert_eq!(Option::<f32>::None.to_value(), Value::Null);
    }
}
