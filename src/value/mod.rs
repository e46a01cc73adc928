//! Dynamic value representation for entity attributes.
//!
//! Entities in this crate are attribute maps, so every attribute is held as
//! a [`Value`]. The enum covers the primitive and rich types a repository
//! backend is expected to produce, plus [`Value::Id`] for opaque
//! identifiers that must be compared by canonical string form rather than
//! by structure.
//!
//! ## Comparable form
//!
//! Foreign-key deduplication and lookup-table matching both work on a
//! value's *comparable form*: the value itself for every variant except
//! `Id`, which is folded to the `String` of its canonical rendering. This
//! is what makes two distinct identifier instances for the same key behave
//! as one, avoiding duplicate query keys and split lookup buckets.

pub mod identifier;
pub mod types;

pub use identifier::{ObjectId, OpaqueIdentifier, ParseObjectIdError};
pub use types::ValueType;

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A dynamically-typed attribute value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    DateTime(DateTime<Utc>),
    Decimal(Decimal),
    Json(serde_json::Value),
    Array(Vec<Value>),
    /// An opaque identifier, compared by canonical string form.
    Id(Arc<dyn OpaqueIdentifier>),
}

impl Value {
    /// Wrap an opaque identifier value.
    pub fn id<I: OpaqueIdentifier + 'static>(id: I) -> Self {
        Value::Id(Arc::new(id))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The form this value is compared by: `Id` folds to the `String` of
    /// its canonical rendering, everything else is itself.
    pub fn comparable_form(&self) -> Cow<'_, Value> {
        match self {
            Value::Id(id) => Cow::Owned(Value::String(id.canonical_string())),
            _ => Cow::Borrowed(self),
        }
    }

    /// Render the comparable form as a map key.
    ///
    /// The rendering is variant-tagged (debug form), so values of different
    /// types never collide: `Int(5)` and `String("5")` produce different
    /// keys, while an `Id` and the plain `String` of its canonical form
    /// produce the same one.
    pub fn lookup_key(&self) -> String {
        format!("{:?}", self.comparable_form())
    }
}

/// Equality over comparable forms.
///
/// Plain variants compare structurally. `Id` compares by canonical string,
/// both against other `Id`s and against a plain `String` holding the same
/// rendering (an identifier and its string form are the same key).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Id(a), Id(b)) => a.canonical_string() == b.canonical_string(),
            (Id(a), String(b)) | (String(b), Id(a)) => a.canonical_string() == *b,
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Uuid(a), Uuid(b)) => a == b,
            (DateTime(a), DateTime(b)) => a == b,
            (Decimal(a), Decimal(b)) => a == b,
            (Json(a), Json(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_equality() {
        assert_eq!(Value::Int(5), Value::Int(5));
        assert_ne!(Value::Int(5), Value::Int(7));
        assert_eq!(Value::String("a".into()), Value::String("a".into()));
        assert_eq!(Value::Null, Value::Null);
        // No cross-type coercion for plain variants
        assert_ne!(Value::Int(5), Value::String("5".into()));
        assert_ne!(Value::Null, Value::Int(0));
    }

    #[test]
    fn test_id_equality_is_by_canonical_string() {
        let a = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let b = ObjectId::from_bytes(*a.bytes());
        // Two distinct instances, one logical key
        assert_eq!(Value::id(a), Value::id(b));

        let c = ObjectId::parse_str("507f191e810c19729de860ea").unwrap();
        assert_ne!(Value::id(a), Value::id(c));
    }

    #[test]
    fn test_id_equals_its_string_form() {
        let a = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            Value::id(a),
            Value::String("507f1f77bcf86cd799439011".into())
        );
        assert_ne!(Value::id(a), Value::String("somethingelse".into()));
    }

    #[test]
    fn test_uuid_variant_keeps_native_equality() {
        let u = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(Value::Uuid(u), Value::Uuid(u));
        // Uuid stored as a plain variant does not coerce to its string form
        assert_ne!(Value::Uuid(u), Value::String(u.to_string()));
        // Wrapped as an opaque identifier, it does
        assert_eq!(Value::id(u), Value::String(u.to_string()));
    }

    #[test]
    fn test_lookup_key_distinguishes_types() {
        assert_ne!(
            Value::Int(5).lookup_key(),
            Value::String("5".into()).lookup_key()
        );
        assert_ne!(
            Value::Bool(true).lookup_key(),
            Value::String("true".into()).lookup_key()
        );
    }

    #[test]
    fn test_lookup_key_folds_ids() {
        let a = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            Value::id(a).lookup_key(),
            Value::String("507f1f77bcf86cd799439011".into()).lookup_key()
        );
    }

    #[test]
    fn test_array_equality_folds_ids_elementwise() {
        let a = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let b = ObjectId::from_bytes(*a.bytes());
        assert_eq!(
            Value::Array(vec![Value::Int(1), Value::id(a)]),
            Value::Array(vec![Value::Int(1), Value::id(b)])
        );
    }
}
