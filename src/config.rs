use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::osm::download::{DEFAULT_OVERPASS_URL, DEFAULT_USER_AGENT};

fn default_overpass_url() -> String {
    DEFAULT_OVERPASS_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_country_prefix() -> String {
    "IR".to_string()
}

fn default_province_admin_level() -> u8 {
    4
}

fn default_county_admin_level() -> u8 {
    5
}

/// Run configuration. Every key is optional in the YAML file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Root of the output tree; provinces and counties get subdirectories.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_country_prefix")]
    pub country_prefix: String,
    #[serde(default = "default_province_admin_level")]
    pub province_admin_level: u8,
    #[serde(default = "default_county_admin_level")]
    pub county_admin_level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overpass_url: default_overpass_url(),
            user_agent: default_user_agent(),
            data_dir: default_data_dir(),
            country_prefix: default_country_prefix(),
            province_admin_level: default_province_admin_level(),
            county_admin_level: default_county_admin_level(),
        }
    }
}

impl Config {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        // An empty file parses as YAML null.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the config file if one is given, otherwise use the defaults.
    pub fn load(config_filepath: Option<&Path>) -> anyhow::Result<Self> {
        let Some(config_filepath) = config_filepath else {
            return Ok(Self::default());
        };
        if !config_filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", config_filepath));
        }
        let config_contents = read_to_string(config_filepath)
            .with_context(|| format!("Reading config file {:?}", config_filepath))?;
        Self::from_yaml(&config_contents)
            .with_context(|| format!("Parsing config file {:?}", config_filepath))
    }

    pub fn provinces_dir(&self) -> PathBuf {
        self.data_dir.join("provinces")
    }

    pub fn counties_dir(&self) -> PathBuf {
        self.data_dir.join("counties")
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use testdir::testdir;

    use super::Config;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("data_dir: /tmp/boundaries\ncounty_admin_level: 6\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/boundaries"));
        assert_eq!(config.county_admin_level, 6);
        assert_eq!(config.province_admin_level, 4);
        assert_eq!(config.overpass_url, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.counties_dir(), PathBuf::from("/tmp/boundaries/counties"));
    }

    #[test]
    fn test_load_without_file_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let missing = testdir!().join("missing.yaml");
        assert!(Config::load(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_load_file() {
        let config_filepath = testdir!().join("config.yaml");
        fs::write(&config_filepath, "overpass_url: http://localhost:12345/api/interpreter\n")
            .unwrap();
        let config = Config::load(Some(config_filepath.as_path())).unwrap();
        assert_eq!(config.overpass_url, "http://localhost:12345/api/interpreter");
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }
}
