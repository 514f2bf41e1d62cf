use clap::Parser;

/// Push a player's stats to a display plugin.
#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, env = "TRMNL_PLUGIN_ID")]
    pub plugin_id: Option<String>,
    #[arg(long, env = "RIVALS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, env = "RIVALS_USERNAME")]
    pub username: Option<String>,
    #[arg(long, env = "SYNC_PROXY")]
    pub proxy: Option<String>,
    #[arg(long, env = "RIVALS_API_URL", default_value = "https://marvelrivalsapi.com/api/v1")]
    pub stats_url: String,
    #[arg(long, env = "TRMNL_API_URL", default_value = "https://usetrmnl.com/api")]
    pub display_url: String,
    /// per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    /// seconds between the summary and the match update
    #[arg(long, default_value_t = 305)]
    pub publish_delay: u64,
    /// seconds to wait before retrying a failed profile fetch
    #[arg(long, default_value_t = 600)]
    pub retry_cooldown: u64,
    /// seconds after which a profile counts as stale
    #[arg(long, default_value_t = 3600)]
    pub stale_after: u64,
}
