// ABOUTME: Configuration types and parsing for flotilla.yml.
// ABOUTME: Handles YAML parsing, token interpolation, and template generation.

mod budgets;
mod token;

pub use budgets::{ConfirmConfig, ReadyConfig};
pub use token::TokenValue;

use crate::error::{Error, Result};
use crate::types::{FleetName, ImageId};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "flotilla.yml";
pub const CONFIG_FILENAME_ALT: &str = "flotilla.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".flotilla/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_fleet_name")]
    pub fleet: FleetName,

    #[serde(deserialize_with = "deserialize_image_id")]
    pub image: ImageId,

    pub provider: ProviderConfig,

    #[serde(default)]
    pub confirm: ConfirmConfig,

    #[serde(default)]
    pub ready: ReadyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,

    #[serde(default)]
    pub token: TokenValue,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn template() -> Self {
        Config {
            fleet: FleetName::new("my-fleet").unwrap(),
            image: ImageId::parse("ubuntu-24-04-x64").unwrap(),
            provider: ProviderConfig {
                endpoint: "https://cloud.example.com".to_string(),
                token: TokenValue::default(),
            },
            confirm: ConfirmConfig::default(),
            ready: ReadyConfig::default(),
        }
    }
}

pub fn init_config(
    dir: &Path,
    fleet: Option<&str>,
    image: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(f) = fleet {
        config.fleet = FleetName::new(f).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(i) = image {
        config.image = ImageId::parse(i).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"fleet: {}
image: {}
provider:
  endpoint: {}
  token:
    env: FLOTILLA_API_TOKEN
confirm:
  timeout: 2m
  delay: 5s
ready:
  retries: 20
  delay: 3s
"#,
        config.fleet, config.image, config.provider.endpoint
    )
}

// Custom deserializers

fn deserialize_fleet_name<'de, D>(deserializer: D) -> std::result::Result<FleetName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    FleetName::new(&s).map_err(serde::de::Error::custom)
}

fn deserialize_image_id<'de, D>(deserializer: D) -> std::result::Result<ImageId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ImageId::parse(&s).map_err(serde::de::Error::custom)
}
