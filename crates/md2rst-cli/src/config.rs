use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use md2rst_render::RenderOptions;

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "md2rst.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Command-line flags take precedence over the file.
    pub fn options(self, skip_html: bool, levels: Option<String>) -> RenderOptions {
        let mut options = self.render;
        if skip_html {
            options.skip_html = true;
        }
        if let Some(levels) = levels {
            options.levels = levels;
        }
        options
    }
}
