use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use slotlog_core::suggest::DEFAULT_SUGGESTION_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotlogConfig {
    pub storage: StorageSection,
    #[serde(default)]
    pub suggest: SuggestSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestSection {
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

impl Default for SuggestSection {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

fn default_suggest_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

impl SlotlogConfig {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            storage: StorageSection {
                path: data_dir.to_string_lossy().to_string(),
            },
            suggest: SuggestSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<SlotlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &SlotlogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("slotlog"));
        }
    }
    Ok(home_dir()?.join(".config").join("slotlog"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("slotlog"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("slotlog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = SlotlogConfig::new(Path::new("/tmp/slotlog-data"));

        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn test_suggest_section_is_optional() {
        let config: SlotlogConfig = toml::from_str("[storage]\npath = \"/data\"\n").unwrap();
        assert_eq!(config.storage.path, "/data");
        assert_eq!(config.suggest.limit, DEFAULT_SUGGESTION_LIMIT);

        let config: SlotlogConfig =
            toml::from_str("[storage]\npath = \"/data\"\n[suggest]\nlimit = 3\n").unwrap();
        assert_eq!(config.suggest.limit, 3);
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = 5").unwrap();
        let err = read_config(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config"));
    }
}
