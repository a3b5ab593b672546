//! Where headings and search candidates come from.

use thiserror::Error;

use crate::domain::candidate::Candidate;

pub mod catalog;
pub mod headings;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog search failed: {0}")]
    Source(String),
}

/// Catalog search capability, injected into the resolver.
///
/// Returns candidates ranked best-first, or an empty list when nothing matched.
/// Implementations fail instead of retrying when the underlying search fails.
pub trait CandidateSource {
    fn query(&self, query: &str) -> Result<Vec<Candidate>, SearchError>;
}
