//! Works-lookup collaborator: find candidate books for a title-only parse.

pub mod catalog;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::WorkCandidate;

pub use catalog::WorksCatalog;
pub use mock::{MockLookup, MockResponse};

/// Default number of candidates requested per query.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("lookup backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed lookup response: {0}")]
    Malformed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A source of candidate works searchable by free-text title.
pub trait WorksLookup: Send + Sync {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Return up to `limit` works whose titles resemble `query`.
    ///
    /// An empty vector means "nothing found"; errors are reserved for
    /// backends that failed or answered with something unreadable.
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<WorkCandidate>, LookupError>> + Send + 'a>>;
}
