//! Belongs-to relations: the source holds the foreign key.

use crate::model::Record;
use crate::query::Inclusion;
use crate::relation::def::{RelationDef, RelationType, ResolvedRelation};
use crate::relation::error::{IncludeError, InvalidRelationError};
use crate::relation::helpers::include_one_batched;
use crate::relation::InclusionResolver;
use crate::repository::RepositoryGetter;

/// Validate a belongs-to definition and fill in its defaults.
///
/// `key_from` must be declared; `key_to` defaults to the target model's
/// first id property.
pub fn resolve_belongs_to(def: &RelationDef) -> Result<ResolvedRelation, InvalidRelationError> {
    if def.rel_type() != RelationType::BelongsTo {
        return Err(InvalidRelationError::new(
            "relation type must be BelongsTo",
            def,
        ));
    }
    let target = def
        .target_resolver()
        .ok_or_else(|| InvalidRelationError::new("target must be a type resolver", def))?
        .get();
    let source = def
        .source_model()
        .ok_or_else(|| InvalidRelationError::new("source model must be defined", def))?
        .clone();
    let key_from = def
        .key_from_name()
        .ok_or_else(|| InvalidRelationError::new("keyFrom must be defined", def))?
        .to_owned();
    let key_to = match def.key_to_name() {
        Some(key_to) => key_to.to_owned(),
        None => target
            .id_properties()
            .first()
            .ok_or_else(|| {
                InvalidRelationError::new(
                    format!("target model {} does not define an id property", target.name()),
                    def,
                )
            })?
            .clone(),
    };
    Ok(ResolvedRelation {
        rel_type: RelationType::BelongsTo,
        name: def.name().to_owned(),
        source,
        target,
        key_from,
        key_to,
    })
}

/// Populates a belongs-to relation on batches of fetched entities.
pub struct BelongsToInclusionResolver {
    relation: ResolvedRelation,
    get_target_repo: RepositoryGetter,
}

impl BelongsToInclusionResolver {
    /// Resolve the definition up front; an invalid one never gets to
    /// fetch.
    pub fn new(
        def: &RelationDef,
        get_target_repo: RepositoryGetter,
    ) -> Result<Self, InvalidRelationError> {
        Ok(Self {
            relation: resolve_belongs_to(def)?,
            get_target_repo,
        })
    }

    pub fn relation(&self) -> &ResolvedRelation {
        &self.relation
    }
}

impl InclusionResolver for BelongsToInclusionResolver {
    fn fetch_included_models(
        &self,
        entities: &mut [Record],
        inclusion: &Inclusion,
    ) -> Result<(), IncludeError> {
        include_one_batched(&self.relation, &self.get_target_repo, entities, inclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_cfg;

    fn valid_def() -> RelationDef {
        RelationDef::belongs_to("customer")
            .source(tests_cfg::order_model())
            .target_model(tests_cfg::customer_model())
            .key_from("customerId")
    }

    #[test]
    fn test_resolve_fills_key_to_from_target_id() {
        let resolved = resolve_belongs_to(&valid_def()).unwrap();
        assert_eq!(resolved.key_from, "customerId");
        assert_eq!(resolved.key_to, "id");
        assert_eq!(resolved.source.name(), "Order");
        assert_eq!(resolved.target.name(), "Customer");
    }

    #[test]
    fn test_resolve_honors_explicit_key_to() {
        let resolved = resolve_belongs_to(&valid_def().key_to("altId")).unwrap();
        assert_eq!(resolved.key_to, "altId");
    }

    #[test]
    fn test_resolve_rejects_wrong_kind() {
        let def = RelationDef::has_one("customer");
        let err = resolve_belongs_to(&def).unwrap_err();
        assert_eq!(err.reason(), "relation type must be BelongsTo");
    }

    #[test]
    fn test_resolve_requires_target() {
        let def = RelationDef::belongs_to("customer")
            .source(tests_cfg::order_model())
            .key_from("customerId");
        let err = resolve_belongs_to(&def).unwrap_err();
        assert_eq!(err.reason(), "target must be a type resolver");
    }

    #[test]
    fn test_resolve_requires_source() {
        let def = RelationDef::belongs_to("customer")
            .target_model(tests_cfg::customer_model())
            .key_from("customerId");
        let err = resolve_belongs_to(&def).unwrap_err();
        assert_eq!(err.reason(), "source model must be defined");
    }

    #[test]
    fn test_resolve_requires_key_from() {
        let def = RelationDef::belongs_to("customer")
            .source(tests_cfg::order_model())
            .target_model(tests_cfg::customer_model());
        let err = resolve_belongs_to(&def).unwrap_err();
        assert_eq!(err.reason(), "keyFrom must be defined");
    }

    #[test]
    fn test_resolve_requires_target_id_property() {
        let target = crate::model::ModelDef::new("Tag")
            .property("label", crate::model::PropertyDef::new());
        let def = RelationDef::belongs_to("tag")
            .source(tests_cfg::order_model())
            .target_model(std::sync::Arc::new(target))
            .key_from("tagId");
        let err = resolve_belongs_to(&def).unwrap_err();
        assert_eq!(
            err.reason(),
            "target model Tag does not define an id property"
        );
    }
}
