//! Relation error taxonomy.

use std::error::Error;
use std::fmt;

use crate::relation::def::RelationDef;
use crate::repository::RepositoryError;

/// A relation definition that cannot be resolved.
///
/// Carries the relation name alongside the reason so callers can tell
/// which declaration is at fault without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRelationError {
    relation: String,
    reason: String,
}

impl InvalidRelationError {
    pub fn new(reason: impl Into<String>, def: &RelationDef) -> Self {
        Self {
            relation: def.name().to_owned(),
            reason: reason.into(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for InvalidRelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid relation '{}': {}", self.relation, self.reason)
    }
}

impl Error for InvalidRelationError {}

/// A malformed value handed to a relation utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError {
    message: String,
}

impl InvalidArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl Error for InvalidArgumentError {}

/// Errors raised while populating a relation during a fetch.
#[derive(Debug)]
pub enum IncludeError {
    /// The inclusion directive carried an option the resolver does not
    /// support.
    UnsupportedOption { relation: String, option: String },
    /// The target repository failed; passed through unchanged.
    Repository(RepositoryError),
}

impl fmt::Display for IncludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeError::UnsupportedOption { relation, option } => {
                write!(
                    f,
                    "inclusion of relation '{}' does not support option '{}'",
                    relation, option
                )
            }
            IncludeError::Repository(err) => err.fmt(f),
        }
    }
}

impl Error for IncludeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IncludeError::Repository(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepositoryError> for IncludeError {
    fn from(err: RepositoryError) -> Self {
        IncludeError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::def::RelationDef;

    #[test]
    fn test_invalid_relation_display() {
        let def = RelationDef::belongs_to("customer");
        let err = InvalidRelationError::new("relation type must be BelongsTo", &def);
        assert_eq!(
            err.to_string(),
            "invalid relation 'customer': relation type must be BelongsTo"
        );
        assert_eq!(err.relation(), "customer");
    }

    #[test]
    fn test_include_error_passes_repository_text_through() {
        let err: IncludeError = RepositoryError::Unavailable("Customer".into()).into();
        assert_eq!(err.to_string(), "repository unavailable: Customer");
    }

    #[test]
    fn test_unsupported_option_display() {
        let err = IncludeError::UnsupportedOption {
            relation: "customer".into(),
            option: "scope".into(),
        };
        assert_eq!(
            err.to_string(),
            "inclusion of relation 'customer' does not support option 'scope'"
        );
    }
}
