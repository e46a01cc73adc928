//! Relation metadata resolution and batched inclusion.
//!
//! Declaring a relation produces a [`RelationDef`]; resolving it checks the
//! declaration against the models involved and fills in conventional key
//! names, yielding a [`ResolvedRelation`]. An inclusion resolver wraps a
//! resolved relation and a repository accessor and populates the relation
//! on whole batches of fetched entities with a single target query.

pub mod belongs_to;
pub mod def;
pub mod error;
pub mod has_one;
pub mod helpers;

pub use belongs_to::{resolve_belongs_to, BelongsToInclusionResolver};
pub use def::{RelationDef, RelationType, ResolvedRelation};
pub use error::{IncludeError, InvalidArgumentError, InvalidRelationError};
pub use has_one::{resolve_has_one, HasOneInclusionResolver};
pub use helpers::{dedupe, dedupe_value};

use crate::model::Record;
use crate::query::Inclusion;

/// Populates one relation on a batch of entities.
///
/// Implementations must issue at most one target query per call,
/// regardless of batch size.
pub trait InclusionResolver: Send + Sync {
    fn fetch_included_models(
        &self,
        entities: &mut [Record],
        inclusion: &Inclusion,
    ) -> Result<(), IncludeError>;
}
