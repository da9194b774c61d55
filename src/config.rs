use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QaConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("qaforum.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("questions.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<QaConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: QaConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &QaConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database path: explicit flag, then config file, then the default
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&QaConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
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
        let loaded = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qaforum.toml");
        let config = QaConfig { database: Some("data/forum.db".to_string()) };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &QaConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(QaConfig::default()));
    }

    #[test]
    fn test_database_path_precedence() {
        let config = QaConfig { database: Some("from-config.db".to_string()) };

        assert_eq!(
            resolve_database_path(Some(PathBuf::from("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(resolve_database_path(None, None), default_database_path());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("questions.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
