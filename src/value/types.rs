//! `ValueType` trait for conversions between Rust types and [`Value`].
//!
//! Each supported Rust type maps onto one `Value` variant. `into_value`
//! never fails; `from_value` returns `None` when the variant does not
//! match or holds null.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{ObjectId, Value};

/// Maps a Rust type onto its [`Value`] variant.
pub trait ValueType: Sized {
    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Option<Self>;
}

impl ValueType for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_value_type_int {
    ($($t:ty),*) => {
        $(
            impl ValueType for $t {
                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => <$t>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_value_type_int!(i8, i16, i32, i64, u8, u16, u32);

impl ValueType for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v as f32),
            _ => None,
        }
    }
}

impl ValueType for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Bytes(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for uuid::Uuid {
    fn into_value(self) -> Value {
        Value::Uuid(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uuid(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for DateTime<Utc> {
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::DateTime(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for Decimal {
    fn into_value(self) -> Value {
        Value::Decimal(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Decimal(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for serde_json::Value {
    fn into_value(self) -> Value {
        Value::Json(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl ValueType for ObjectId {
    fn into_value(self) -> Value {
        Value::id(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            // Canonical string form is the only stable surface of an
            // opaque identifier, so recover through it.
            Value::Id(id) => ObjectId::parse_str(&id.canonical_string()).ok(),
            Value::String(s) => ObjectId::parse_str(&s).ok(),
            _ => None,
        }
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ValueType> From<T> for Value {
    fn from(value: T) -> Self {
        value.into_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        assert_eq!(i32::from_value(42i32.into_value()), Some(42));
        assert_eq!(u8::from_value(Value::Int(300)), None); // out of range
        assert_eq!(i64::from_value(Value::String("42".into())), None);
    }

    #[test]
    fn test_option_round_trip() {
        assert!(matches!(None::<i32>.into_value(), Value::Null));
        assert_eq!(Option::<i32>::from_value(Value::Null), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::Int(5)), Some(Some(5)));
    }

    #[test]
    fn test_from_str_and_primitives() {
        let v: Value = "hello".into();
        assert_eq!(v, Value::String("hello".into()));
        let v: Value = 7i64.into();
        assert_eq!(v, Value::Int(7));
        let v: Value = true.into();
        assert_eq!(v, Value::Bool(true));
    }

    #[test]
    fn test_object_id_round_trip() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let value = oid.into_value();
        assert_eq!(ObjectId::from_value(value), Some(oid));
        // Also recoverable from the plain string form
        assert_eq!(
            ObjectId::from_value(Value::String("507f1f77bcf86cd799439011".into())),
            Some(oid)
        );
    }
}
