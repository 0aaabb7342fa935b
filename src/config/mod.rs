use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::storage::ReadErrorPolicy;
use crate::utils;

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_WORKBOOK: &str = "resep";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Stem of the workbook file under the managed workbooks directory.
    pub workbook: String,
    #[serde(default)]
    pub read_error_policy: ReadErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: DEFAULT_WORKBOOK.into(),
            read_error_policy: ReadErrorPolicy::default(),
        }
    }
}

impl Config {
    /// Path of the configured workbook file.
    pub fn workbook_path(&self) -> PathBuf {
        utils::workbook_file(&self.workbook)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::at(utils::config_file())
    }

    pub fn at(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            utils::ensure_dir(parent)?;
        }
        Ok(Self { path })
    }

    /// Loads the persisted configuration, falling back to defaults when no
    /// file exists yet.
    pub fn load(&self) -> Result<Config, StoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        utils::ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::at(temp.path().join("config.json")).unwrap();
        let config = manager.load().expect("load config");
        assert_eq!(config.workbook, "resep");
        assert_eq!(config.read_error_policy, ReadErrorPolicy::FailOpen);
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::at(temp.path().join("config.json")).unwrap();
        let config = Config {
            workbook: "apotek".into(),
            read_error_policy: ReadErrorPolicy::Propagate,
        };
        manager.save(&config).expect("save config");

        let loaded = manager.load().expect("load config");
        assert_eq!(loaded.workbook, "apotek");
        assert_eq!(loaded.read_error_policy, ReadErrorPolicy::Propagate);
    }
}
