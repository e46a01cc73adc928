//! Query surface: filters and inclusion directives.
//!
//! The engine only ever *issues* one filter shape ("attribute value is in
//! this set"), but callers also use filters to describe what they fetched
//! and which relations to include, so [`Filter`] carries a condition list
//! and an include list, built fluently.

use crate::model::Record;
use crate::value::Value;

/// A single attribute predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Attribute equals the value.
    Eq(Value),
    /// Attribute is one of the values.
    Inq(Vec<Value>),
}

impl Operator {
    /// Whether a candidate attribute value satisfies this predicate.
    ///
    /// Matching uses [`Value`] equality, so opaque identifiers match by
    /// canonical string form.
    pub fn matches(&self, candidate: &Value) -> bool {
        match self {
            Operator::Eq(value) => value == candidate,
            Operator::Inq(values) => values.iter().any(|v| v == candidate),
        }
    }
}

/// A conjunctive filter over named attributes, plus inclusion directives.
///
/// ```
/// use kinship::{Filter, Value};
///
/// let filter = Filter::new().where_in("id", vec![Value::Int(5), Value::Int(7)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Operator)>,
    includes: Vec<Inclusion>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((attribute.into(), Operator::Eq(value.into())));
        self
    }

    pub fn where_in(mut self, attribute: impl Into<String>, values: Vec<Value>) -> Self {
        self.conditions.push((attribute.into(), Operator::Inq(values)));
        self
    }

    /// Request that a relation be populated on the returned entities.
    pub fn include(mut self, inclusion: Inclusion) -> Self {
        self.includes.push(inclusion);
        self
    }

    pub fn conditions(&self) -> &[(String, Operator)] {
        &self.conditions
    }

    pub fn includes(&self) -> &[Inclusion] {
        &self.includes
    }

    /// Whether a record satisfies every condition. A missing attribute
    /// fails the predicate that names it.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(attribute, operator)| {
            record
                .get(attribute)
                .is_some_and(|value| operator.matches(value))
        })
    }
}

/// A request to populate one named relation on fetched entities.
///
/// The options bag is deliberately small: `scope` exists so callers can
/// express the directive they mean, but scoped inclusion is not yet
/// supported and is rejected by the resolvers rather than silently
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Inclusion {
    pub relation: String,
    pub scope: Option<Box<Filter>>,
}

impl Inclusion {
    pub fn relation(name: impl Into<String>) -> Self {
        Self {
            relation: name.into(),
            scope: None,
        }
    }

    pub fn scope(mut self, filter: Filter) -> Self {
        self.scope = Some(Box::new(filter));
        self
    }
}
