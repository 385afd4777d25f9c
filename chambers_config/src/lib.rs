use std::{net::IpAddr, path::Path};

use anyhow::Context;
use chambers_models::email_address::EmailAddress;
use config::{File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads the configuration from the paths in the `CONFIG_PATH` environment
/// variable (colon separated, later files override earlier ones), falling
/// back to the config file at the repository root.
pub fn load() -> anyhow::Result<Config> {
    match std::env::var("CONFIG_PATH") {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(_) => load_paths(&[DEFAULT_CONFIG_PATH]),
    }
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub ratelimit: RateLimitConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitConfig {
    pub global_window: Duration,
    pub global_capacity: usize,
    pub source_window: Duration,
    pub source_capacity: usize,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
