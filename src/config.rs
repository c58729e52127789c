use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocdbConfig {
    pub database: Option<String>,
    pub log_level: Option<String>,
}

impl LocdbConfig {
    /// Database path from the config, or the default one
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("locdb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("locdb.db")
}

/// A missing config file is not an error: it yields `None`.
pub fn load_config(path: Option<&Path>) -> Result<Option<LocdbConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LocdbConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &LocdbConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(dir.path().join("locdb.toml").as_path())).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locdb.toml");
        let config = LocdbConfig {
            database: Some("data/postcodes.db".to_string()),
            log_level: Some("debug".to_string()),
        };

        write_config(&path, &config, false).unwrap();
        let loaded = load_config(Some(path.as_path())).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_path(), PathBuf::from("data/postcodes.db"));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locdb.toml");
        write_config(&path, &LocdbConfig::default(), false).unwrap();

        let err = write_config(&path, &LocdbConfig::default(), false).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        write_config(&path, &LocdbConfig::default(), true).unwrap();
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locdb.toml");
        std::fs::write(&path, "database = [").unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_database_path() {
        assert_eq!(LocdbConfig::default().database_path(), PathBuf::from("locdb.db"));
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("locdb.db");
        ensure_db_dir(&db_path).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
    }
}
