use std::fmt::Display;

use super::catalog_id::CatalogId;

/// One entry of a song list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    pub title: String,
    /// Never recovered from the heading itself, supplied by the caller.
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Album year, kept only when the parser is told to keep it.
    pub year: Option<u16>,
    resolved_id: Option<CatalogId>,
}

impl Track {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Track as produced from a list heading, not resolved yet.
    pub(crate) fn from_parts(
        title: impl Into<String>,
        artist: Option<String>,
        album: Option<String>,
        year: Option<u16>,
    ) -> Self {
        Self {
            title: title.into(),
            artist,
            album,
            year,
            resolved_id: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn resolved_id(&self) -> Option<&CatalogId> {
        self.resolved_id.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_id.is_some()
    }

    /// Assigned once, on successful resolution or when restoring a stored entry.
    pub(crate) fn mark_resolved(&mut self, id: CatalogId) {
        debug_assert!(self.resolved_id.is_none(), "track resolved twice");
        self.resolved_id = Some(id);
    }

    pub fn uri(&self, scheme: &str) -> Option<String> {
        self.resolved_id.as_ref().map(|id| id.to_uri(scheme))
    }

    /// Search query used against the catalog: title and artist, space-joined.
    pub fn search_query(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} {}", self.title, artist),
            None => self.title.clone(),
        }
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.title,
            self.artist.as_deref().unwrap_or("Unknown artist"),
            self.album.as_deref().unwrap_or("Unknown album"),
            self.resolved_id
                .as_ref()
                .map(CatalogId::as_str)
                .unwrap_or("Unknown catalog id")
        )
    }
}
