//! Has-one relations: the target holds the foreign key.

use heck::ToLowerCamelCase;
use log::debug;

use crate::model::Record;
use crate::query::Inclusion;
use crate::relation::def::{RelationDef, RelationType, ResolvedRelation};
use crate::relation::error::{IncludeError, InvalidRelationError};
use crate::relation::helpers::include_one_batched;
use crate::relation::InclusionResolver;
use crate::repository::RepositoryGetter;

/// Validate a has-one definition and fill in its defaults.
///
/// `key_from` is always the source model's first id property. `key_to`
/// defaults to the camel-cased `{source}_id` convention and must name a
/// declared property on the target.
pub fn resolve_has_one(def: &RelationDef) -> Result<ResolvedRelation, InvalidRelationError> {
    if def.rel_type() != RelationType::HasOne {
        return Err(InvalidRelationError::new(
            "relation type must be HasOne",
            def,
        ));
    }
    let target = def
        .target_resolver()
        .ok_or_else(|| InvalidRelationError::new("target must be a type resolver", def))?
        .get();
    let source = def
        .source_model()
        .filter(|m| !m.name().is_empty())
        .ok_or_else(|| InvalidRelationError::new("source model must be defined", def))?
        .clone();
    let key_from = source
        .id_properties()
        .first()
        .ok_or_else(|| {
            InvalidRelationError::new(
                format!("source model {} does not define an id property", source.name()),
                def,
            )
        })?
        .clone();
    let key_to = match def.key_to_name() {
        // Declared keys are taken as-is, so resolving twice is stable.
        Some(key_to) => key_to.to_owned(),
        None => {
            let fk = format!("{}_id", source.name()).to_lower_camel_case();
            if !target.has_property(&fk) {
                return Err(InvalidRelationError::new(
                    format!(
                        "target model {} is missing definition of foreign key {}",
                        target.name(),
                        fk
                    ),
                    def,
                ));
            }
            fk
        }
    };
    debug!(
        "resolved has-one '{}': {}.{} -> {}.{}",
        def.name(),
        source.name(),
        key_from,
        target.name(),
        key_to
    );
    Ok(ResolvedRelation {
        rel_type: RelationType::HasOne,
        name: def.name().to_owned(),
        source,
        target,
        key_from,
        key_to,
    })
}

/// Populates a has-one relation on batches of fetched entities.
pub struct HasOneInclusionResolver {
    relation: ResolvedRelation,
    get_target_repo: RepositoryGetter,
}

impl HasOneInclusionResolver {
    pub fn new(
        def: &RelationDef,
        get_target_repo: RepositoryGetter,
    ) -> Result<Self, InvalidRelationError> {
        Ok(Self {
            relation: resolve_has_one(def)?,
            get_target_repo,
        })
    }

    pub fn relation(&self) -> &ResolvedRelation {
        &self.relation
    }
}

impl InclusionResolver for HasOneInclusionResolver {
    fn fetch_included_models(
        &self,
        entities: &mut [Record],
        inclusion: &Inclusion,
    ) -> Result<(), IncludeError> {
        include_one_batched(&self.relation, &self.get_target_repo, entities, inclusion)
    }
}
