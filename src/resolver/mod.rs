//! Resolves parsed tracks to catalog ids by fuzzy matching search candidates.

use crate::{
    config::ResolverConfig,
    domain::{candidate::Candidate, catalog_id::CatalogId, track::Track},
    source::{CandidateSource, SearchError},
};

pub mod score;

pub use score::{score, similarity};

/// Outcome of resolving a single track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(CatalogId),
    /// No candidates, or none of them reached the threshold.
    NotFound,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    fuzzy_threshold: u8,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }

    pub fn fuzzy_threshold(&self) -> u8 {
        self.fuzzy_threshold
    }

    /// Picks the first candidate, in the given order, that scores at least the threshold.
    ///
    /// The order of `candidates` is trusted: a better match further down the
    /// list never beats an earlier one that qualifies. On success the
    /// candidate id is stored on the track.
    pub fn resolve(&self, track: &mut Track, candidates: &[Candidate]) -> Resolution {
        if let Some(id) = track.resolved_id() {
            return Resolution::Resolved(id.clone());
        }

        let threshold = f64::from(self.fuzzy_threshold);

        match candidates
            .iter()
            .find(|candidate| score(track, candidate) >= threshold)
        {
            Some(candidate) => {
                let id = candidate.catalog_id();
                track.mark_resolved(id.clone());
                Resolution::Resolved(id)
            }
            None => Resolution::NotFound,
        }
    }

    /// Searches `source` for the track and resolves it against the results.
    ///
    /// Search failures are returned as is, there are no retries.
    pub fn resolve_with<S>(&self, track: &mut Track, source: &S) -> Result<Resolution, SearchError>
    where
        S: CandidateSource + ?Sized,
    {
        if let Some(id) = track.resolved_id() {
            return Ok(Resolution::Resolved(id.clone()));
        }

        let candidates = source.query(&track.search_query())?;
        Ok(self.resolve(track, &candidates))
    }
}
