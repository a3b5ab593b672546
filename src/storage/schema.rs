use rusqlite::Connection;

pub mod tables {
    pub const PLAYLISTS: &str = "playlists";
    pub const ENTRIES: &str = "entries";

    pub const ALL_TABLES: &[&str] = &[PLAYLISTS, ENTRIES];
}

pub mod columns {
    pub const NAME: &str = "name";
    pub const CREATED_AT: &str = "created_at";
    pub const PLAYLIST: &str = "playlist";
    pub const POSITION: &str = "position";
    pub const TITLE: &str = "title";
    pub const ARTIST: &str = "artist";
    pub const ALBUM: &str = "album";
    pub const YEAR: &str = "year";
    pub const CATALOG_ID: &str = "catalog_id";
}

pub use columns::*;
pub use tables::*;

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;
CREATE TABLE IF NOT EXISTS playlists (
    name TEXT PRIMARY KEY,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    playlist TEXT NOT NULL REFERENCES playlists(name) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    title TEXT NOT NULL,
    artist TEXT,
    album TEXT,
    year INTEGER,
    catalog_id TEXT,
    PRIMARY KEY (playlist, position)
);
"#;

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}
