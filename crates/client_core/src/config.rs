use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::UserId;
use thiserror::Error;

use crate::{tags::TagPolicy, upload::MEDIA_POST_ENDPOINT};

pub const DEFAULT_CONFIG_FILE: &str = "newzio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    /// Public origin used in share links.
    pub site_url: String,
    pub upload_endpoint: String,
    pub tag_policy: TagPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000/api".into(),
            site_url: "https://newzio.vercel.app".into(),
            upload_endpoint: MEDIA_POST_ENDPOINT.into(),
            tag_policy: TagPolicy::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    site_url: Option<String>,
    upload_endpoint: Option<String>,
    privileged_user_ids: Option<Vec<String>>,
    restricted_tags: Option<Vec<String>>,
    trailing_tags: Option<Vec<String>>,
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Settings {
    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.site_url {
            self.site_url = v;
        }
        if let Some(v) = file.upload_endpoint {
            self.upload_endpoint = v;
        }
        if let Some(v) = file.privileged_user_ids {
            self.tag_policy.privileged_user_ids = v.into_iter().map(UserId::new).collect();
        }
        if let Some(v) = file.restricted_tags {
            self.tag_policy.restricted_tags = v;
        }
        if let Some(v) = file.trailing_tags {
            self.tag_policy.trailing_tags = v;
        }
    }

    /// Every file key `x` can also be set through `NEWZIO_X` or `APP__X`;
    /// `APP__*` wins. `NEWZIO_API_URL` is accepted for the base URL.
    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let lookup = |keys: &[&str]| keys.iter().filter_map(|&key| env(key)).last();

        let api_keys = ["NEWZIO_API_URL", "NEWZIO_API_BASE_URL", "APP__API_BASE_URL"];
        if let Some(v) = lookup(&api_keys) {
            self.api_base_url = v;
        }
        if let Some(v) = lookup(&["NEWZIO_SITE_URL", "APP__SITE_URL"]) {
            self.site_url = v;
        }
        if let Some(v) = lookup(&["NEWZIO_UPLOAD_ENDPOINT", "APP__UPLOAD_ENDPOINT"]) {
            self.upload_endpoint = v;
        }
        if let Some(v) = lookup(&["NEWZIO_PRIVILEGED_USER_IDS", "APP__PRIVILEGED_USER_IDS"]) {
            self.tag_policy.privileged_user_ids =
                parse_list(&v).into_iter().map(UserId::new).collect();
        }
        if let Some(v) = lookup(&["NEWZIO_RESTRICTED_TAGS", "APP__RESTRICTED_TAGS"]) {
            self.tag_policy.restricted_tags = parse_list(&v);
        }
        if let Some(v) = lookup(&["NEWZIO_TRAILING_TAGS", "APP__TRAILING_TAGS"]) {
            self.tag_policy.trailing_tags = parse_list(&v);
        }
    }
}

/// Defaults, then `newzio.toml` in the working directory, then the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), |key| std::env::var(key).ok())
}

/// A missing file is not an error; a malformed one is.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file = toml::from_str::<FileSettings>(&raw).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            settings.apply_file(file);
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    settings.apply_env(env);
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
