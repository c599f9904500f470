// src/config.rs
//! Application configuration: defaults, optional config.yaml, then environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::utils::normalize_base_url;

pub const DEFAULT_ATS_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPLOAD_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq)]
pub struct AtsServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: String,
    pub ats: AtsServiceConfig,
    pub upload_delay: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileSection {
    ats_server_url: Option<String>,
    timeout_seconds: Option<u64>,
    upload_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            ats: AtsServiceConfig {
                base_url: DEFAULT_ATS_SERVER_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            upload_delay: Duration::from_millis(DEFAULT_UPLOAD_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Load configuration for the current environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = std::env::var("CAREER_INSIGHTS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));

        let section = if config_path.exists() {
            Self::load_file(&config_path, &environment)?
        } else {
            FileSection::default()
        };

        Self::resolve(&environment, section, |key| std::env::var(key).ok())
    }

    fn get_environment() -> String {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_file(path: &Path, environment: &str) -> Result<FileSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_file(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_file(content: &str, environment: &str) -> Result<FileSection> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn resolve(
        environment: &str,
        section: FileSection,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("ATS_SERVER_URL")
            .or(section.ats_server_url)
            .unwrap_or(defaults.ats.base_url);

        let timeout_seconds = match lookup("ATS_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("ATS_TIMEOUT_SECS must be a whole number of seconds")?,
            None => section
                .timeout_seconds
                .unwrap_or(defaults.ats.timeout_seconds),
        };

        let upload_delay_ms = match lookup("ATS_UPLOAD_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("ATS_UPLOAD_DELAY_MS must be a whole number of milliseconds")?,
            None => section.upload_delay_ms.unwrap_or(DEFAULT_UPLOAD_DELAY_MS),
        };

        Ok(Self {
            environment: environment.to_string(),
            ats: AtsServiceConfig {
                base_url: normalize_base_url(&base_url),
                timeout_seconds,
            },
            upload_delay: Duration::from_millis(upload_delay_ms),
        })
    }
}
