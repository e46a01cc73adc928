//! Shared machinery for the inclusion resolvers.
//!
//! Both relation shapes reduce to the same plan: pull one key per entity,
//! deduplicate, issue a single `Inq` query against the target repository,
//! and hand each entity its match. The shape only decides which side holds
//! the foreign key.

use std::collections::HashMap;

use log::debug;

use crate::model::Record;
use crate::query::{Filter, Inclusion};
use crate::relation::def::ResolvedRelation;
use crate::relation::error::{IncludeError, InvalidArgumentError};
use crate::repository::RepositoryGetter;
use crate::value::Value;

/// Deduplicate a slice of values, preserving first-occurrence order.
///
/// Equality is [`Value`] equality, so two opaque identifiers with the same
/// canonical string collapse to one entry, as does an identifier and its
/// string form.
pub fn dedupe(values: &[Value]) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.iter().any(|u| u == value) {
            unique.push(value.clone());
        }
    }
    unique
}

/// Deduplicate the elements of an array value.
///
/// `Null` is treated as an empty array; any other non-array value is
/// rejected.
pub fn dedupe_value(value: &Value) -> Result<Vec<Value>, InvalidArgumentError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(values) => Ok(dedupe(values)),
        other => Err(InvalidArgumentError::new(format!(
            "the value {:?} is not an array",
            other
        ))),
    }
}

/// Group target records by the lookup key of their `key_to` attribute.
///
/// Records with a missing or `Null` key are dropped; they can never match
/// a source entity.
pub fn build_lookup(targets: &[Record], key_to: &str) -> HashMap<String, Vec<Record>> {
    let mut lookup: HashMap<String, Vec<Record>> = HashMap::new();
    for target in targets {
        match target.get(key_to) {
            None | Some(Value::Null) => continue,
            Some(key) => lookup
                .entry(key.lookup_key())
                .or_default()
                .push(target.clone()),
        }
    }
    lookup
}

/// Populate a to-one relation on a batch of entities with one query.
///
/// Reads `relation.key_from` off each entity, deduplicates the non-null
/// keys, fetches every matching target in a single `Inq` find, and
/// attaches the first match (if any) under the relation's name. Entities
/// whose key is missing, null, or dangling are left untouched.
pub fn include_one_batched(
    relation: &ResolvedRelation,
    get_target_repo: &RepositoryGetter,
    entities: &mut [Record],
    inclusion: &Inclusion,
) -> Result<(), IncludeError> {
    if inclusion.scope.is_some() {
        return Err(IncludeError::UnsupportedOption {
            relation: relation.name.clone(),
            option: "scope".into(),
        });
    }
    if entities.is_empty() {
        return Ok(());
    }

    let mut keys: Vec<Value> = Vec::with_capacity(entities.len());
    for entity in entities.iter() {
        match entity.get(&relation.key_from) {
            None | Some(Value::Null) => continue,
            Some(key) => keys.push(key.clone()),
        }
    }
    let keys = dedupe(&keys);
    debug!(
        "including '{}': {} entities, {} distinct keys",
        relation.name,
        entities.len(),
        keys.len()
    );

    let filter = Filter::new().where_in(relation.key_to.clone(), keys);
    let targets = get_target_repo()?.find(&filter)?;
    let lookup = build_lookup(&targets, &relation.key_to);

    for entity in entities.iter_mut() {
        let key = match entity.get(&relation.key_from) {
            None | Some(Value::Null) => continue,
            Some(key) => key.lookup_key(),
        };
        if let Some(matches) = lookup.get(&key) {
            if matches.len() > 1 {
                debug!(
                    "relation '{}': {} targets share key {}, keeping the first",
                    relation.name,
                    matches.len(),
                    key
                );
            }
            if let Some(first) = matches.first() {
                entity.set_related(&relation.name, first.clone());
            }
        }
    }
    Ok(())
}
