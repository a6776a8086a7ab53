//! Engine configuration: provider connection, search tuning, scoring tables.

use crate::error::EngineResult;
use crate::orchestrator::SearchSettings;
use nutrisearch_api_client::ClientConfig;
use nutrisearch_core::config::Config;
use nutrisearch_core::{Error, ResultExt};
use nutrisearch_search::ScoringTables;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default candidate pool gathered before ranking
pub const DEFAULT_CANDIDATE_POOL: usize = 200;

/// Everything needed to build a [`FoodSearchEngine`](crate::FoodSearchEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Provider connection
    pub client: ClientConfig,
    /// Multi-page fetch tuning
    pub search: SearchSettings,
    /// Candidates gathered before ranking (raised to the requested limit)
    pub candidate_pool: usize,
    /// Relevance tables
    pub scoring_tables: ScoringTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            search: SearchSettings::default(),
            candidate_pool: DEFAULT_CANDIDATE_POOL,
            scoring_tables: ScoringTables::default(),
        }
    }
}

impl EngineConfig {
    /// Load from an optional TOML file layered under the environment.
    ///
    /// With `path = None` the standard locations are searched and defaults
    /// apply when no file exists.
    pub fn load(path: Option<&str>) -> EngineResult<Self> {
        let config = Config::load(path)?;
        debug!(path = ?config.path, "Loaded configuration");

        let client = ClientConfig::from_env_and_file(&config.schema.provider)?;

        let scoring_tables = match config.schema.search.scoring_tables.as_deref() {
            Some(tables) => {
                let tables_path = resolve_relative(Path::new(tables), config.path.as_deref());
                load_scoring_tables(&tables_path)?
            }
            None => ScoringTables::default(),
        };

        Ok(Self {
            client,
            search: SearchSettings::from(&config.schema.search),
            candidate_pool: config.schema.search.candidate_pool,
            scoring_tables,
        })
    }

    /// Defaults with the client read from the environment
    pub fn from_env() -> EngineResult<Self> {
        Ok(Self {
            client: ClientConfig::from_env()?,
            ..Self::default()
        })
    }

    /// Builder-style method to set the client configuration
    #[must_use]
    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Builder-style method to set the candidate pool
    #[must_use]
    pub fn with_candidate_pool(mut self, pool: usize) -> Self {
        self.candidate_pool = pool;
        self
    }
}

/// Read scoring tables from TOML; omitted tables keep their built-in values.
pub fn load_scoring_tables(path: &Path) -> EngineResult<ScoringTables> {
    if !path.exists() {
        return Err(Error::config_not_found(path).into());
    }

    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read scoring tables {}", path.display()))?;

    let tables: ScoringTables = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse scoring tables {}", path.display()))?;

    Ok(tables)
}

/// Relative table paths are taken relative to the config file's directory.
fn resolve_relative(path: &Path, config_file: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    config_file
        .and_then(Path::parent)
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrisearch_core::ErrorCode;
    use nutrisearch_search::DataType;
    use std::io::Write;

    #[test]
    fn test_scoring_tables_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
basic_cuts = ["pechuga de pollo", "lomo"]

[[source_priority]]
data_type = "Foundation"
bonus = 0.5
"#
        )
        .unwrap();

        let tables = load_scoring_tables(file.path()).unwrap();
        assert_eq!(tables.basic_cuts, vec!["pechuga de pollo".to_string(), "lomo".to_string()]);
        assert_eq!(tables.source_bonus(DataType::Foundation), 0.5);
        assert_eq!(tables.source_bonus(DataType::SrLegacy), 0.0);
        assert_eq!(tables.chain_brands, ScoringTables::default().chain_brands);
    }

    #[test]
    fn test_missing_scoring_tables() {
        let err = load_scoring_tables(Path::new("/nope/tables.toml")).unwrap_err();
        match err {
            crate::EngineError::Config(e) => assert_eq!(e.code, ErrorCode::ConfigNotFound),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_scoring_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "basic_cuts = 7").unwrap();

        assert!(load_scoring_tables(file.path()).is_err());
    }

    #[test]
    fn test_load_with_relative_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tables.toml"), "basic_preparations = [\"crudo\"]\n").unwrap();
        let config_path = dir.path().join("nutrisearch.toml");
        std::fs::write(
            &config_path,
            "[search]\ncandidate_pool = 50\nretry_attempts = 2\nscoring_tables = \"tables.toml\"\n",
        )
        .unwrap();

        let config = EngineConfig::load(config_path.to_str()).unwrap();
        assert_eq!(config.candidate_pool, 50);
        assert_eq!(config.search.retry.max_attempts, 2);
        assert_eq!(config.scoring_tables.basic_preparations, vec!["crudo".to_string()]);
    }

    #[test]
    fn test_resolve_relative() {
        let config_file = Path::new("/etc/nutrisearch/config.toml");
        assert_eq!(
            resolve_relative(Path::new("tables.toml"), Some(config_file)),
            PathBuf::from("/etc/nutrisearch/tables.toml")
        );
        assert_eq!(
            resolve_relative(Path::new("/abs/tables.toml"), Some(config_file)),
            PathBuf::from("/abs/tables.toml")
        );
        assert_eq!(resolve_relative(Path::new("t.toml"), None), PathBuf::from("t.toml"));
    }
}
