use std::time::Duration;

use thiserror::Error;

use crate::args::Args;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Validated settings for a single sync run.
#[derive(Debug, Clone)]
pub struct Config {
    pub plugin_id: String,
    pub api_key: String,
    pub username: String,
    pub proxy: Option<String>,
    pub stats_url: String,
    pub display_url: String,
    pub timeout: Duration,
    pub publish_delay: Duration,
    pub retry_cooldown: Duration,
    pub stale_after: Duration,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let plugin_id = required(args.plugin_id, "plugin-id")?;
        let api_key = required(args.api_key, "api-key")?;
        let username = required(args.username, "username")?;
        // a blank proxy from the environment means no proxy
        let proxy = args.proxy.filter(|proxy| !proxy.trim().is_empty());

        Ok(Self {
            plugin_id,
            api_key,
            username,
            proxy,
            stats_url: args.stats_url,
            display_url: args.display_url,
            timeout: Duration::from_secs(args.timeout),
            publish_delay: Duration::from_secs(args.publish_delay),
            retry_cooldown: Duration::from_secs(args.retry_cooldown),
            stale_after: Duration::from_secs(args.stale_after),
        })
    }
}
