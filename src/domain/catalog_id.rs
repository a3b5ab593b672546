use std::fmt::Display;

/// Identifier of a track in the external music catalog.
///
/// Opaque to us: whatever the catalog search returned as the item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogId(pub String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// e.g. `spotify:track:6rqhFgbbKwnb9MLmUQDhG6`
    pub fn to_uri(&self, scheme: &str) -> String {
        format!("{scheme}:track:{}", self.0)
    }
}

impl Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogId;

    #[test]
    fn test_uri() {
        let id = CatalogId::new("6rqhFgbbKwnb9MLmUQDhG6");
        assert_eq!(id.to_uri("spotify"), "spotify:track:6rqhFgbbKwnb9MLmUQDhG6");
    }
}
