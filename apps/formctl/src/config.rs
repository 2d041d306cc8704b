use std::{collections::HashMap, fs, io, path::Path};

use anyhow::Context;
use form_client::DEFAULT_SHARE_BASE_URL;

pub const DEFAULT_CONFIG_FILE: &str = "formctl.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub share_base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share_base_url: DEFAULT_SHARE_BASE_URL.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the config file (an explicit path must exist, the default
/// `formctl.toml` may be absent), then environment variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("share_base_url") {
        settings.share_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("FORMCTL_SHARE_BASE_URL") {
        settings.share_base_url = v;
    }
    if let Some(v) = lookup("APP__SHARE_BASE_URL") {
        settings.share_base_url = v;
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
