use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::view::DEFAULT_PAGE_SIZE;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "pledge.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_dir: PathBuf,
    pub page_size: usize,
    pub share_url: String,
    pub share_command: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data"),
            page_size: DEFAULT_PAGE_SIZE,
            share_url: "https://example.org/climate-pledge".into(),
            share_command: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    storage_dir: Option<PathBuf>,
    page_size: Option<usize>,
    share_url: Option<String>,
    share_command: Option<Vec<String>>,
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_file_settings(config_path)? {
        if let Some(v) = file_cfg.storage_dir {
            settings.storage_dir = v;
        }
        if let Some(v) = file_cfg.page_size {
            settings.page_size = v;
        }
        if let Some(v) = file_cfg.share_url {
            settings.share_url = v;
        }
        if let Some(v) = file_cfg.share_command {
            settings.share_command = Some(v);
        }
    }

    for key in ["PLEDGE_STORAGE_DIR", "APP__STORAGE_DIR"] {
        if let Some(v) = env(key) {
            settings.storage_dir = PathBuf::from(v);
        }
    }

    for key in ["PLEDGE_PAGE_SIZE", "APP__PAGE_SIZE"] {
        if let Some(v) = env(key) {
            if let Ok(parsed) = v.trim().parse::<usize>() {
                settings.page_size = parsed;
            }
        }
    }

    for key in ["PLEDGE_SHARE_URL", "APP__SHARE_URL"] {
        if let Some(v) = env(key) {
            settings.share_url = v;
        }
    }

    for key in ["PLEDGE_SHARE_COMMAND", "APP__SHARE_COMMAND"] {
        if let Some(v) = env(key) {
            settings.share_command = Some(v.split_whitespace().map(str::to_string).collect());
        }
    }

    Ok(normalize(settings))
}

fn read_file_settings(config_path: Option<&Path>) -> anyhow::Result<Option<FileSettings>> {
    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn normalize(mut settings: Settings) -> Settings {
    let defaults = Settings::default();

    if settings.page_size == 0 {
        warn!("page_size must be at least 1, using {}", defaults.page_size);
        settings.page_size = defaults.page_size;
    }

    if let Err(err) = Url::parse(settings.share_url.trim()) {
        warn!(
            "invalid share_url '{}' ({err}), using {}",
            settings.share_url, defaults.share_url
        );
        settings.share_url = defaults.share_url;
    }

    if settings
        .share_command
        .as_ref()
        .is_some_and(|argv| argv.is_empty())
    {
        settings.share_command = None;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
