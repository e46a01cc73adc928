//! # kinship
//!
//! A relation-inclusion engine for record-oriented data: declare
//! belongs-to and has-one relations between runtime model definitions,
//! resolve the metadata by convention, and populate related records on
//! whole batches of fetched entities with a single target query each.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use kinship::{
//!     BelongsToInclusionResolver, EntityRepository, InMemoryRepository, Inclusion,
//!     InclusionResolver, ModelDef, PropertyDef, Record, RelationDef, RepositoryGetter, Value,
//! };
//!
//! let customer_model = Arc::new(
//!     ModelDef::new("Customer")
//!         .property("id", PropertyDef::id())
//!         .property("name", PropertyDef::new()),
//! );
//! let order_model = Arc::new(
//!     ModelDef::new("Order")
//!         .property("id", PropertyDef::id())
//!         .property("customerId", PropertyDef::new()),
//! );
//!
//! let customers = Arc::new(InMemoryRepository::new());
//! customers.push(
//!     Record::new(customer_model.clone())
//!         .attr("id", 5)
//!         .attr("name", "Alice"),
//! );
//!
//! let def = RelationDef::belongs_to("customer")
//!     .source(order_model.clone())
//!     .target_model(customer_model)
//!     .key_from("customerId");
//! let repo = customers.clone();
//! let getter: RepositoryGetter =
//!     Arc::new(move || Ok(repo.clone() as Arc<dyn EntityRepository>));
//! let resolver = BelongsToInclusionResolver::new(&def, getter).unwrap();
//!
//! let mut orders = vec![Record::new(order_model).attr("id", 1).attr("customerId", 5)];
//! resolver
//!     .fetch_included_models(&mut orders, &Inclusion::relation("customer"))
//!     .unwrap();
//!
//! assert_eq!(
//!     orders[0].related("customer").and_then(|c| c.get("name")),
//!     Some(&Value::String("Alice".into())),
//! );
//! assert_eq!(customers.find_calls(), 1);
//! ```

pub mod json_helpers;
pub mod model;
pub mod query;
pub mod relation;
pub mod repository;
pub mod value;

#[cfg(test)]
mod tests_cfg;

pub use model::{ModelDef, ModelResolver, PropertyDef, Record};
pub use query::{Filter, Inclusion, Operator};
pub use relation::{
    dedupe, dedupe_value, resolve_belongs_to, resolve_has_one, BelongsToInclusionResolver,
    HasOneInclusionResolver, IncludeError, InclusionResolver, InvalidArgumentError,
    InvalidRelationError, RelationDef, RelationType, ResolvedRelation,
};
pub use repository::{EntityRepository, InMemoryRepository, RepositoryError, RepositoryGetter};
pub use value::{ObjectId, OpaqueIdentifier, Value, ValueType};
