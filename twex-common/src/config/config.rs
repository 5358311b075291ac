// See config.toml for information on the variables here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct TwexConfig {
    pub parser: Parser,
    pub i18n: I18n,
    pub logging: Logging,
}

impl TwexConfig {
    /// Reads the config file at `path`. A missing file is not an error, and gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Parser {
    pub allow_keyword_arguments: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            allow_keyword_arguments: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct I18n {
    pub default_locale: String,
    pub translations_dir: Option<PathBuf>,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            translations_dir: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Logging {
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}
