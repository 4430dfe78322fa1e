// Test config fixtures

use std::path::PathBuf;
use tempfile::TempDir;

use fsmap::config::Config;

/// A config file in a temporary directory
pub struct ConfigFixture {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl ConfigFixture {
    /// Write `config` to a temporary config.json
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("config.json");
        config.save_to_file(&path)?;

        Ok(ConfigFixture {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Write raw text as config.json
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, content)?;

        Ok(ConfigFixture {
            _temp_dir: temp_dir,
            path,
        })
    }
}
