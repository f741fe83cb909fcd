//! Configuration file support for nvd-sync.
//!
//! Provides YAML-based configuration through `nvd-sync.config.yml` files,
//! including data structures, file loading, validation, and the merge of
//! file values with command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::NvdClient;
use crate::application::dto::CommitOptions;
use crate::mirror::domain::date_window::MAX_WINDOW_DAYS;
use crate::mirror::policies::RetryPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "nvd-sync.config.yml";

/// Delay between page requests without an API key (NVD allows 5 requests per 30s)
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 6000;
/// Delay between page requests with an API key (NVD allows 50 requests per 30s)
pub const DEFAULT_REQUEST_DELAY_WITH_KEY_MS: u64 = 600;

pub const DEFAULT_AUTHOR_NAME: &str = "nvd-sync";
pub const DEFAULT_AUTHOR_EMAIL: &str = "nvd-sync@users.noreply.github.com";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub request_delay_ms: Option<u64>,
    pub retry_delay_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub max_window_days: Option<u32>,
    pub commit: Option<bool>,
    pub push: Option<bool>,
    pub commit_message: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(days) = config.max_window_days {
        if days == 0 || days > MAX_WINDOW_DAYS {
            bail!(
                "Invalid config: max_window_days must be between 1 and {} (got {}).\n\n\
                 💡 Hint: The NVD API rejects lastMod ranges longer than {} days.",
                MAX_WINDOW_DAYS,
                days,
                MAX_WINDOW_DAYS
            );
        }
    }

    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Large pages can take a while; the default is {} seconds.",
            NvdClient::DEFAULT_TIMEOUT_SECONDS
        );
    }

    if let Some(ref message) = config.commit_message {
        if message.trim().is_empty() {
            bail!(
                "Invalid config: commit_message must not be empty.\n\n\
                 💡 Hint: Use a message such as \"{}\".",
                CommitOptions::DEFAULT_MESSAGE
            );
        }
    }

    if let Some(ref email) = config.author_email {
        if !email.contains('@') {
            bail!(
                "Invalid config: author_email '{}' is not an email address.",
                email
            );
        }
    }

    if config.push == Some(true) && config.commit != Some(true) {
        bail!(
            "Invalid config: push requires commit.\n\n\
             💡 Hint: Set 'commit: true' as well, or pass --commit."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; they take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub commit: bool,
    pub push: bool,
    pub commit_message: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub request_delay: Duration,
    pub retry_delay: Duration,
    pub max_retries: u32,
    pub max_window_days: u32,
    pub commit: bool,
    pub push: bool,
    pub commit_message: String,
    pub author_name: String,
    pub author_email: String,
}

impl Settings {
    /// Merges command-line overrides, the config file and defaults, in that order.
    pub fn resolve(file: Option<ConfigFile>, overrides: SettingsOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let api_key = overrides
            .api_key
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty());

        let default_delay = if api_key.is_some() {
            DEFAULT_REQUEST_DELAY_WITH_KEY_MS
        } else {
            DEFAULT_REQUEST_DELAY_MS
        };

        let commit = overrides.commit || file.commit.unwrap_or(false);
        let push = overrides.push || file.push.unwrap_or(false);
        if push && !commit {
            bail!("--push requires --commit.\n\n💡 Hint: Pass --commit together with --push.");
        }

        let commit_message = overrides
            .commit_message
            .or(file.commit_message)
            .unwrap_or_else(|| CommitOptions::DEFAULT_MESSAGE.to_string());
        if commit_message.trim().is_empty() {
            bail!("The commit message must not be empty.");
        }

        Ok(Self {
            api_url: overrides
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| NvdClient::DEFAULT_BASE_URL.to_string()),
            api_key,
            timeout: Duration::from_secs(
                file.timeout_secs
                    .unwrap_or(NvdClient::DEFAULT_TIMEOUT_SECONDS),
            ),
            request_delay: Duration::from_millis(file.request_delay_ms.unwrap_or(default_delay)),
            retry_delay: Duration::from_secs(
                file.retry_delay_secs
                    .unwrap_or(RetryPolicy::DEFAULT_DELAY_SECS),
            ),
            max_retries: file.max_retries.unwrap_or(RetryPolicy::DEFAULT_MAX_RETRIES),
            max_window_days: file.max_window_days.unwrap_or(MAX_WINDOW_DAYS),
            commit,
            push,
            commit_message,
            author_name: file
                .author_name
                .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
            author_email: file
                .author_email
                .unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string()),
        })
    }
}
