//! Offline candidate source backed by a JSON dump of catalog search items.

use std::path::Path;

use crate::domain::candidate::Candidate;

use super::{CandidateSource, SearchError};

pub struct JsonCatalog {
    items: Vec<Candidate>,
}

impl JsonCatalog {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self { items }
    }

    /// Loads a JSON array of search items
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let contents = std::fs::read_to_string(path)?;
        let items: Vec<Candidate> = serde_json::from_str(&contents)?;
        log::debug!("Loaded {} catalog items from {}", items.len(), path.display());
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// lowercase, punctuation replaced by spaces
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

impl CandidateSource for JsonCatalog {
    /// Items ranked by how many query words appear in their name or artists.
    /// Items sharing no word with the query are left out.
    fn query(&self, query: &str) -> Result<Vec<Candidate>, SearchError> {
        let norm_query = normalize(query);
        let tokens = norm_query.split_whitespace().collect::<Vec<_>>();

        let mut hits = self
            .items
            .iter()
            .filter_map(|item| {
                let artists = item
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let haystack = normalize(&format!("{} {}", item.name, artists));
                let words = haystack.split_whitespace().collect::<Vec<_>>();

                let count = tokens.iter().filter(|t| words.contains(t)).count();
                (count > 0).then_some((count, item))
            })
            .collect::<Vec<_>>();

        // stable, so catalog order breaks ties
        hits.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(hits.into_iter().map(|(_, item)| item.clone()).collect())
    }
}
