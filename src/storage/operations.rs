use std::time::SystemTime;

use crate::{
    config,
    domain::{catalog_id::CatalogId, track::Track},
    storage::{
        db::{self, SecondsSinceUnix, system_time_to_i64},
        error::StorageError,
        schema::{columns, tables},
    },
};

use anyhow::anyhow;
use columns::*;
use rusqlite::{OptionalExtension, params};
use tables::*;

#[derive(Debug, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub name: String,
    pub created_at: SecondsSinceUnix,
    pub tracks: usize,
    /// tracks which got a catalog id
    pub resolved: usize,
}

/// Stores converted song lists and their resolution results
pub struct PlaylistStore {
    pub(crate) db: rusqlite::Connection,
}

impl PlaylistStore {
    /// when called, opens a data base connection
    pub fn new(db_config: &config::Database) -> Result<Self, StorageError> {
        let db = db::open(db_config)?;
        Ok(Self::from_existing_conn(db))
    }

    pub fn from_existing_conn(db: rusqlite::Connection) -> Self {
        Self { db }
    }

    /// Saves tracks under `name` in list order. An existing playlist with that name is replaced.
    pub fn save_playlist(
        &mut self,
        name: &str,
        tracks: &[Track],
    ) -> Result<PlaylistSummary, StorageError> {
        self.save_playlist_at(name, tracks, SystemTime::now())
    }

    fn save_playlist_at(
        &mut self,
        name: &str,
        tracks: &[Track],
        time: SystemTime,
    ) -> Result<PlaylistSummary, StorageError> {
        let created_at = system_time_to_i64(time).map_err(StorageError::Internal)?;
        let tx = self.db.transaction()?;

        let replaced = tx.execute(
            &format!("DELETE FROM {ENTRIES} WHERE {PLAYLIST} = ?1"),
            params![name],
        )?;
        tx.execute(
            &format!("DELETE FROM {PLAYLISTS} WHERE {NAME} = ?1"),
            params![name],
        )?;
        if replaced > 0 {
            log::info!("Replacing playlist {name} ({replaced} entries)");
        }

        tx.execute(
            &format!("INSERT INTO {PLAYLISTS} ({NAME}, {CREATED_AT}) VALUES (?1, ?2)"),
            params![name, created_at],
        )?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {ENTRIES} ({PLAYLIST}, {POSITION}, {TITLE}, {ARTIST}, {ALBUM}, {YEAR}, {CATALOG_ID})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ))?;

            for (position, track) in tracks.iter().enumerate() {
                let position = i64::try_from(position)
                    .map_err(|e| StorageError::Internal(anyhow!("playlist too long: {e}")))?;
                stmt.execute(params![
                    name,
                    position,
                    track.title,
                    track.artist,
                    track.album,
                    track.year,
                    track.resolved_id().map(CatalogId::as_str),
                ])?;
            }
        }

        tx.commit()?;

        Ok(PlaylistSummary {
            name: name.to_string(),
            created_at,
            tracks: tracks.len(),
            resolved: tracks.iter().filter(|t| t.is_resolved()).count(),
        })
    }

    /// All stored playlists, newest first
    pub fn list_playlists(&mut self) -> Result<Vec<PlaylistSummary>, StorageError> {
        let mut stmt = self.db.prepare(&format!(
            "SELECT p.{NAME}, p.{CREATED_AT}, COUNT(e.{POSITION}), COUNT(e.{CATALOG_ID})
             FROM {PLAYLISTS} p LEFT JOIN {ENTRIES} e ON e.{PLAYLIST} = p.{NAME}
             GROUP BY p.{NAME}
             ORDER BY p.{CREATED_AT} DESC, p.{NAME}"
        ))?;

        let playlists = stmt
            .query_map([], |row| {
                Ok(PlaylistSummary {
                    name: row.get(0)?,
                    created_at: row.get(1)?,
                    tracks: row.get::<_, i64>(2)? as usize,
                    resolved: row.get::<_, i64>(3)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(playlists)
    }

    /// Loads the tracks of a stored playlist in their original order
    pub fn get_playlist(&mut self, name: &str) -> Result<Vec<Track>, StorageError> {
        let exists = self
            .db
            .query_row(
                &format!("SELECT 1 FROM {PLAYLISTS} WHERE {NAME} = ?1"),
                params![name],
                |_| Ok(()),
            )
            .optional()?;

        if exists.is_none() {
            return Err(StorageError::PlaylistNotFound(name.to_string()));
        }

        let mut stmt = self.db.prepare(&format!(
            "SELECT {TITLE}, {ARTIST}, {ALBUM}, {YEAR}, {CATALOG_ID} FROM {ENTRIES}
             WHERE {PLAYLIST} = ?1 ORDER BY {POSITION}"
        ))?;

        let tracks = stmt
            .query_map(params![name], |row| {
                let mut track = Track::from_parts(
                    row.get::<_, String>(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                );
                if let Some(id) = row.get::<_, Option<String>>(4)? {
                    track.mark_resolved(CatalogId::new(id));
                }
                Ok(track)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::storage::schema;

    fn setup_store() -> anyhow::Result<PlaylistStore> {
        let conn = rusqlite::Connection::open_in_memory()?;
        schema::init(&conn)?;
        Ok(PlaylistStore::from_existing_conn(conn))
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn tracks() -> Vec<Track> {
        let mut du_hast = Track::new("Du Hast")
            .with_artist("Rammstein")
            .with_album("Sehnsucht");
        du_hast.year = Some(1997);
        du_hast.mark_resolved(CatalogId::new("5J0ooqTX6mDzUKN3KGTyOA"));

        let sonne = Track::new("Sonne").with_artist("Rammstein");

        vec![du_hast, sonne]
    }

    #[test]
    fn test_save_and_get_playlist() -> anyhow::Result<()> {
        let mut store = setup_store()?;

        let summary = store.save_playlist_at("rammstein", &tracks(), at(100))?;

        assert_eq!(
            summary,
            PlaylistSummary {
                name: "rammstein".to_string(),
                created_at: 100,
                tracks: 2,
                resolved: 1,
            }
        );
        assert_eq!(store.get_playlist("rammstein")?, tracks());

        Ok(())
    }

    #[test]
    fn test_save_replaces_existing() -> anyhow::Result<()> {
        let mut store = setup_store()?;
        store.save_playlist_at("rammstein", &tracks(), at(100))?;

        store.save_playlist_at("rammstein", &[Track::new("Mein Herz brennt")], at(200))?;

        let loaded = store.get_playlist("rammstein")?;
        assert_eq!(loaded, vec![Track::new("Mein Herz brennt")]);
        assert_eq!(store.list_playlists()?.len(), 1);

        Ok(())
    }

    #[test]
    fn test_list_playlists_newest_first() -> anyhow::Result<()> {
        let mut store = setup_store()?;
        store.save_playlist_at("old", &tracks(), at(100))?;
        store.save_playlist_at("empty", &[], at(300))?;

        let playlists = store.list_playlists()?;

        assert_eq!(
            playlists,
            vec![
                PlaylistSummary {
                    name: "empty".to_string(),
                    created_at: 300,
                    tracks: 0,
                    resolved: 0,
                },
                PlaylistSummary {
                    name: "old".to_string(),
                    created_at: 100,
                    tracks: 2,
                    resolved: 1,
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn test_get_unknown_playlist() -> anyhow::Result<()> {
        let mut store = setup_store()?;

        let result = store.get_playlist("nope");

        assert!(matches!(result, Err(StorageError::PlaylistNotFound(name)) if name == "nope"));
        Ok(())
    }
}
