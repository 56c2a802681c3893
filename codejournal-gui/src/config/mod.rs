use std::{fs, path::PathBuf};

use codejournal_lib::{fs::config_dir, repository::config::Error};
use serde::{Deserialize, Serialize};
use tracing::warn;

const FILE_NAME: &str = "gui.toml";

/// The frontend's configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub dark_mode: bool,
}

impl GuiConfig {
    pub fn load() -> Self {
        let path = match config_dir() {
            Ok(dir) => dir.join(FILE_NAME),
            Err(e) => {
                warn!("No configuration directory, using defaults: {e}");
                return Self::default();
            }
        };

        if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|contents| toml::from_str(&contents).ok())
                .unwrap_or_else(|| {
                    warn!("Ignoring unreadable {}", path.display());
                    Self::default()
                })
        } else {
            let cfg = Self::default();
            if let Err(e) = cfg.save() {
                warn!("Failed to write default GUI configuration: {e}");
            }
            cfg
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        let dir = config_dir().map_err(|source| Error::Io {
            path: PathBuf::from(FILE_NAME),
            source,
        })?;
        let path = dir.join(FILE_NAME);

        fs::write(&path, contents).map_err(|source| Error::Io { path, source })
    }
}

/// The iced theme for the light or dark appearance.
pub fn theme(dark_mode: bool) -> iced::Theme {
    if dark_mode {
        iced::Theme::Dark
    } else {
        iced::Theme::Light
    }
}
