use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::domain::track::Track;
use crate::parser::{HeadingParser, artist_from_list_title};
use crate::resolver::{Resolution, Resolver};
use crate::source::{catalog::JsonCatalog, headings::read_headings};
use crate::storage::db::i64_seconds_to_local_time;
use crate::storage::operations::PlaylistStore;

#[derive(Parser)]
#[command(name = "songlist")]
#[command(version = "0.1")]
#[command(about = "Turns \"greatest songs\" lists into catalog playlists")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "songlist.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Text file with one list heading per line, e.g. `12. Du Hast (Sehnsucht, 1997)`
    #[arg(long)]
    pub headings: PathBuf,

    /// Artist of every song in the list
    #[arg(short, long)]
    pub artist: Option<String>,

    /// Title of the list page, used to guess the artist when --artist is not given
    #[arg(long)]
    pub list_title: Option<String>,
}

impl ListArgs {
    fn artist(&self) -> Option<String> {
        self.artist.clone().or_else(|| {
            self.list_title
                .as_deref()
                .and_then(artist_from_list_title)
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse list headings into tracks
    Parse {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Parse list headings and find each track in a catalog
    Resolve {
        #[command(flatten)]
        list: ListArgs,

        /// JSON file with catalog search items
        #[arg(long)]
        catalog: PathBuf,

        /// Store the result as a playlist with this name
        #[arg(short, long)]
        save: Option<String>,
    },
    /// List stored playlists
    Playlists,
    /// Show tracks of a stored playlist
    Show {
        /// Playlist name
        name: String,
    },
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;

    match &cli.command {
        Commands::Parse { list } => {
            let tracks = parse_list(list, &cfg.parser)?;
            for track in &tracks {
                println!("{track}");
            }
        }

        Commands::Resolve {
            list,
            catalog,
            save,
        } => {
            let mut tracks = parse_list(list, &cfg.parser)?;
            let catalog = JsonCatalog::load(catalog)
                .with_context(|| format!("Failed to load catalog {}", catalog.display()))?;
            let resolver = Resolver::new(&cfg.resolver);

            resolve_all(&resolver, &catalog, &mut tracks, &cfg.resolver.uri_scheme)?;

            if let Some(name) = save {
                let mut store = PlaylistStore::new(&cfg.database)?;
                let summary = store.save_playlist(name, &tracks)?;
                info!(
                    "Saved playlist {} ({} of {} tracks resolved)",
                    summary.name, summary.resolved, summary.tracks
                );
            }
        }

        Commands::Playlists => {
            let mut store = PlaylistStore::new(&cfg.database)?;
            let playlists = store.list_playlists()?;
            if playlists.is_empty() {
                println!("No playlists stored yet");
            }
            for playlist in playlists {
                println!(
                    "{}  created {}, {} of {} tracks resolved",
                    playlist.name,
                    i64_seconds_to_local_time(playlist.created_at)?,
                    playlist.resolved,
                    playlist.tracks
                );
            }
        }

        Commands::Show { name } => {
            let mut store = PlaylistStore::new(&cfg.database)?;
            let tracks = store.get_playlist(name)?;
            for (position, track) in tracks.iter().enumerate() {
                println!("{:>3}. {track}", position + 1);
                if let Some(uri) = track.uri(&cfg.resolver.uri_scheme) {
                    println!("     {uri}");
                }
            }
        }
    }

    Ok(())
}

/// Reads and parses headings. Malformed headings are reported and skipped.
fn parse_list(list: &ListArgs, parser_config: &config::ParserConfig) -> anyhow::Result<Vec<Track>> {
    let headings = read_headings(&list.headings)?;
    let artist = list.artist();
    match &artist {
        Some(artist) => info!("Parsing {} headings by {artist}", headings.len()),
        None => info!("Parsing {} headings, artist unknown", headings.len()),
    }

    let parser = HeadingParser::new(parser_config);
    Ok(parser
        .parse_all(&headings, artist.as_deref())
        .into_iter()
        .filter_map(|result| match result {
            Ok(track) => Some(track),
            Err(err) => {
                warn!("Skipping heading: {err}");
                None
            }
        })
        .collect())
}

/// Resolves every track; a track that is not found does not stop the others.
fn resolve_all(
    resolver: &Resolver,
    catalog: &JsonCatalog,
    tracks: &mut [Track],
    uri_scheme: &str,
) -> anyhow::Result<()> {
    let mut not_found = 0;

    for track in tracks.iter_mut() {
        match resolver.resolve_with(track, catalog)? {
            Resolution::Resolved(id) => println!("{}  {track}", id.to_uri(uri_scheme)),
            Resolution::NotFound => {
                not_found += 1;
                println!("not found  {track}");
            }
        }
    }

    info!(
        "Resolved {} of {} tracks (threshold {})",
        tracks.len() - not_found,
        tracks.len(),
        resolver.fuzzy_threshold()
    );
    Ok(())
}
