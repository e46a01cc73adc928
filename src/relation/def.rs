//! Relation metadata.
//!
//! A [`RelationDef`] is what a caller declares: possibly partial, with the
//! target model behind a deferred resolver and the key names left to
//! convention. [`resolve`](RelationDef::resolve) turns it into a
//! [`ResolvedRelation`] with every field concrete, or explains what is
//! missing.

use std::fmt;
use std::sync::Arc;

use crate::model::{ModelDef, ModelResolver};
use crate::relation::belongs_to::resolve_belongs_to;
use crate::relation::error::InvalidRelationError;
use crate::relation::has_one::resolve_has_one;

/// The two supported relation shapes.
///
/// `BelongsTo`: the source holds a foreign key naming the target's id.
/// `HasOne`: the target holds a foreign key naming the source's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    BelongsTo,
    HasOne,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::BelongsTo => "BelongsTo",
            RelationType::HasOne => "HasOne",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared relation, built fluently and resolved on demand.
#[derive(Clone)]
pub struct RelationDef {
    rel_type: RelationType,
    name: String,
    source: Option<Arc<ModelDef>>,
    target: Option<ModelResolver>,
    key_from: Option<String>,
    key_to: Option<String>,
}

impl RelationDef {
    /// Declare a belongs-to relation with the given name.
    pub fn belongs_to(name: impl Into<String>) -> Self {
        Self::new(RelationType::BelongsTo, name)
    }

    /// Declare a has-one relation with the given name.
    pub fn has_one(name: impl Into<String>) -> Self {
        Self::new(RelationType::HasOne, name)
    }

    fn new(rel_type: RelationType, name: impl Into<String>) -> Self {
        Self {
            rel_type,
            name: name.into(),
            source: None,
            target: None,
            key_from: None,
            key_to: None,
        }
    }

    /// The model declaring the relation.
    pub fn source(mut self, source: Arc<ModelDef>) -> Self {
        self.source = Some(source);
        self
    }

    /// The related model, behind a deferred resolver.
    pub fn target(mut self, target: ModelResolver) -> Self {
        self.target = Some(target);
        self
    }

    /// Convenience for an already-known target model.
    pub fn target_model(self, target: Arc<ModelDef>) -> Self {
        self.target(ModelResolver::resolved(target))
    }

    /// Name of the key attribute on the owning side.
    pub fn key_from(mut self, key_from: impl Into<String>) -> Self {
        self.key_from = Some(key_from.into());
        self
    }

    /// Name of the key attribute on the owned side.
    pub fn key_to(mut self, key_to: impl Into<String>) -> Self {
        self.key_to = Some(key_to.into());
        self
    }

    pub fn rel_type(&self) -> RelationType {
        self.rel_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_model(&self) -> Option<&Arc<ModelDef>> {
        self.source.as_ref()
    }

    pub fn target_resolver(&self) -> Option<&ModelResolver> {
        self.target.as_ref()
    }

    pub fn key_from_name(&self) -> Option<&str> {
        self.key_from.as_deref()
    }

    pub fn key_to_name(&self) -> Option<&str> {
        self.key_to.as_deref()
    }

    /// Fill in defaults and validate, dispatching on the relation kind.
    pub fn resolve(&self) -> Result<ResolvedRelation, InvalidRelationError> {
        match self.rel_type {
            RelationType::BelongsTo => resolve_belongs_to(self),
            RelationType::HasOne => resolve_has_one(self),
        }
    }
}

// Hand-written: the target resolver may still be pending.
impl fmt::Debug for RelationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationDef")
            .field("rel_type", &self.rel_type)
            .field("name", &self.name)
            .field("source", &self.source.as_ref().map(|m| m.name()))
            .field("target", &self.target)
            .field("key_from", &self.key_from)
            .field("key_to", &self.key_to)
            .finish()
    }
}

/// A fully-determined relation: both models known, both key names set.
#[derive(Debug, Clone)]
pub struct ResolvedRelation {
    pub rel_type: RelationType,
    pub name: String,
    pub source: Arc<ModelDef>,
    pub target: Arc<ModelDef>,
    pub key_from: String,
    pub key_to: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_cfg;

    #[test]
    fn test_relation_type_display() {
        assert_eq!(RelationType::BelongsTo.to_string(), "BelongsTo");
        assert_eq!(RelationType::HasOne.to_string(), "HasOne");
    }

    #[test]
    fn test_builder_accumulates() {
        let def = RelationDef::belongs_to("customer")
            .source(tests_cfg::order_model())
            .target_model(tests_cfg::customer_model())
            .key_from("customerId");
        assert_eq!(def.rel_type(), RelationType::BelongsTo);
        assert_eq!(def.name(), "customer");
        assert_eq!(def.key_from_name(), Some("customerId"));
        assert_eq!(def.key_to_name(), None);
    }

    #[test]
    fn test_resolve_dispatches_by_kind() {
        let resolved = RelationDef::belongs_to("customer")
            .source(tests_cfg::order_model())
            .target_model(tests_cfg::customer_model())
            .key_from("customerId")
            .resolve()
            .unwrap();
        assert_eq!(resolved.rel_type, RelationType::BelongsTo);
        assert_eq!(resolved.key_to, "id");

        let resolved = RelationDef::has_one("address")
            .source(tests_cfg::customer_model())
            .target_model(tests_cfg::address_model())
            .resolve()
            .unwrap();
        assert_eq!(resolved.rel_type, RelationType::HasOne);
        assert_eq!(resolved.key_from, "id");
        assert_eq!(resolved.key_to, "customerId");
    }
}
