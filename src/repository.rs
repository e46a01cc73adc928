//! Repository abstraction the inclusion resolvers fetch through.
//!
//! Resolvers never talk to a backend directly. They are handed a
//! [`RepositoryGetter`] and call it once per batch, so repository wiring
//! can be deferred (circular model graphs) and swapped freely in tests.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::model::Record;
use crate::query::Filter;

/// Errors surfaced while obtaining a repository or fetching from it.
#[derive(Debug)]
pub enum RepositoryError {
    /// The repository for a model could not be obtained.
    Unavailable(String),
    /// The backing store failed.
    Backend(Box<dyn Error + Send + Sync>),
    /// Anything else.
    Other(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Unavailable(what) => {
                write!(f, "repository unavailable: {}", what)
            }
            RepositoryError::Backend(err) => write!(f, "backend error: {}", err),
            RepositoryError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RepositoryError::Backend(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Minimal read surface a relation target must expose.
pub trait EntityRepository: Send + Sync {
    /// Return every record matching the filter.
    fn find(&self, filter: &Filter) -> Result<Vec<Record>, RepositoryError>;
}

/// Deferred repository accessor.
///
/// Invoked at fetch time, every time, so late-bound wiring stays live;
/// resolvers deliberately do not memoize what it returns.
pub type RepositoryGetter =
    Arc<dyn Fn() -> Result<Arc<dyn EntityRepository>, RepositoryError> + Send + Sync>;

/// In-memory repository over a vector of records.
///
/// Counts `find` calls so tests can assert how many queries a batch
/// actually issued.
#[derive(Default)]
pub struct InMemoryRepository {
    records: Mutex<Vec<Record>>,
    find_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// How many times `find` has been called.
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

impl EntityRepository for InMemoryRepository {
    fn find(&self, filter: &Filter) -> Result<Vec<Record>, RepositoryError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Other("record store lock poisoned".into()))?;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
