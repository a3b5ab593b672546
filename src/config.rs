use anyhow::{Context, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_FUZZY_THRESHOLD: u8 = 90;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            database: Default::default(),
            parser: Default::default(),
            resolver: Default::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let cfg: Config = toml::from_str(&contents).with_context(|| "Failed to parse config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same as [`Config::load`], but a missing file means default settings.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.resolver.fuzzy_threshold <= 100,
            "fuzzy_threshold must be within 0..=100, got {}",
            self.resolver.fuzzy_threshold
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Database {
    pub in_memory: bool,
    pub path: Option<PathBuf>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            in_memory: false,
            path: Some(PathBuf::from("songlist.db")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParserConfig {
    /// keep the album year on parsed tracks instead of dropping it
    #[serde(default)]
    pub keep_year: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ResolverConfig {
    /// 0-100, lower finds more matches but also more wrong ones
    pub fuzzy_threshold: u8,
    /// prefix for printed track uris, `{scheme}:track:{id}`
    pub uri_scheme: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            uri_scheme: "spotify".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
in_memory = true

[parser]
keep_year = true

[resolver]
fuzzy_threshold = 80
uri_scheme = "catalog"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert!(cfg.database.in_memory);
        assert!(cfg.parser.keep_year);
        assert_eq!(cfg.resolver.fuzzy_threshold, 80);
        assert_eq!(cfg.resolver.uri_scheme, "catalog");

        Ok(())
    }

    #[test]
    fn test_parse_file_database_config() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
in_memory = false
path = "/tmp/songlist.db"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert!(!cfg.database.in_memory);
        assert_eq!(cfg.database.path, Some(PathBuf::from("/tmp/songlist.db")));

        // sections left out fall back to defaults
        assert!(!cfg.parser.keep_year);
        assert_eq!(cfg.resolver.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(cfg.resolver.uri_scheme, "spotify");

        Ok(())
    }

    #[test]
    fn test_partial_database_section() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("version = 1\n[database]\npath = \"x.db\"\n")?;
        assert!(!cfg.database.in_memory);
        assert_eq!(cfg.database.path, Some(PathBuf::from("x.db")));

        let cfg: Config = toml::from_str("version = 1\n[database]\nin_memory = false\n")?;
        assert_eq!(cfg.database.path, Some(PathBuf::from("songlist.db")));

        Ok(())
    }

    #[test]
    fn test_partial_resolver_section() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("version = 1\n[resolver]\nfuzzy_threshold = 75\n")?;

        assert_eq!(cfg.resolver.fuzzy_threshold, 75);
        assert_eq!(cfg.resolver.uri_scheme, "spotify");
        Ok(())
    }

    #[test]
    fn test_load_rejects_threshold_above_100() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 1\n[resolver]\nfuzzy_threshold = 150\n")?;

        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_load_or_default_missing_file() -> anyhow::Result<()> {
        let dir = tempdir()?;

        let cfg = Config::load_or_default(&dir.path().join("missing.toml"))?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.resolver.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(cfg.database.path, Some(PathBuf::from("songlist.db")));
        Ok(())
    }
}
