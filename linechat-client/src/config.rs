//! Client configuration loading
//!
//! Reads the optional TOML config file. The default location is optional;
//! a file named on the command line is required to exist and parse.

use std::path::Path;

use linechat_utils::{config_file, LinechatError, Result};

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Pseudo used instead of prompting
    pub pseudo: Option<String>,
    /// Default tracing filter (`LINECHAT_LOG` wins)
    pub log_filter: Option<String>,
}

impl ClientConfig {
    /// Load from `explicit`, or from the default location if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = config_file();
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load and parse one config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LinechatError::ConfigNotFound(path.to_path_buf())
            } else {
                LinechatError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        toml::from_str(&content).map_err(|e| LinechatError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Pseudo to identify with: the command line wins over the file, blank
    /// values count as unset
    pub fn resolve_pseudo(&self, from_cli: Option<String>) -> Option<String> {
        from_cli
            .or_else(|| self.pseudo.clone())
            .filter(|p| !p.trim().is_empty())
    }
}
