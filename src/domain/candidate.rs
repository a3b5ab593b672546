use serde::Deserialize;

use super::catalog_id::CatalogId;

/// One item returned by a catalog search, read-only for the resolver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(rename = "album", deserialize_with = "album_name")]
    pub album_name: String,
    #[serde(default)]
    pub artists: Vec<CandidateArtist>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateArtist {
    pub name: String,
}

impl Candidate {
    pub fn catalog_id(&self) -> CatalogId {
        CatalogId::new(self.id.clone())
    }
}

/// catalog payloads nest the album as `{"album": {"name": ...}}`
fn album_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Album {
        name: String,
    }

    Ok(Album::deserialize(deserializer)?.name)
}
