// src/settings.rs
//
// Settings come from built-in defaults, then `~/.config/mindtick/config.toml`
// if present, then `MINDTICK_*` environment variables.

use crate::error::{MindtickError, Result};
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"
message_prefix = "-"
color = true
"#;

#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    message_prefix: String,
    color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Character every message has to start with, e.g. `mindtick win -shipped it`.
    pub message_prefix: char,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            message_prefix: '-',
            color: true,
        }
    }
}

/// `~/.config/mindtick/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mindtick").join("config.toml"))
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(config_path(), Environment::with_prefix("MINDTICK"))
    }

    fn load_from(path: Option<PathBuf>, env: Environment) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Toml).required(false));
        }
        let raw: RawSettings = builder.add_source(env).build()?.try_deserialize()?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = MindtickError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let mut chars = raw.message_prefix.chars();
        let message_prefix = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c,
            _ => {
                return Err(MindtickError::InvalidConfig(format!(
                    "message_prefix must be a single non-space character, got {:?}",
                    raw.message_prefix
                )))
            }
        };
        Ok(Settings {
            message_prefix,
            color: raw.color,
        })
    }
}
