use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    account::{fetch_account, RefreshPolicy},
    client::{Client, ConstructionError},
    config::Config,
    enrich::enrich_match,
    history::fetch_recent_matches,
    payload::{assemble, Documents},
    publisher::Publisher,
    reference::ReferenceTables,
};

/// One sync run for one player: fetch, reshape, publish.
pub struct SyncJob {
    client: Client,
    publisher: Publisher,
    username: String,
    policy: RefreshPolicy,
}

impl SyncJob {
    pub fn new(config: &Config) -> Result<Self, ConstructionError> {
        let client = Client::new(
            &config.stats_url,
            &config.api_key,
            config.proxy.as_deref(),
            config.timeout,
        )?;
        let publisher = Publisher::new(
            &config.display_url,
            &config.plugin_id,
            config.proxy.as_deref(),
            config.timeout,
            config.publish_delay,
        )?;
        let policy = RefreshPolicy {
            stale_after: config.stale_after,
            retry_cooldown: config.retry_cooldown,
        };
        Ok(Self {
            client,
            publisher,
            username: config.username.clone(),
            policy,
        })
    }

    /// Everything up to, but not including, the publish step.
    pub async fn collect(&self, now: DateTime<Utc>) -> anyhow::Result<Documents> {
        let username = self.username.as_str();
        let profile = fetch_account(&self.client, username, now, &self.policy)
            .await
            .with_context(|| format!("fetching profile of {}", username))?;
        log::info!(
            "{}: {} level {}, {} ranked games, {}/{}/{} K/D/A",
            profile.username,
            profile.rank,
            profile.level,
            profile.ranked_games,
            profile.ranked_kills,
            profile.ranked_deaths,
            profile.ranked_assists
        );

        let summaries = fetch_recent_matches(&self.client, username)
            .await
            .with_context(|| format!("fetching match history of {}", username))?;
        let tables = ReferenceTables::fetch(&self.client)
            .await
            .context("fetching hero and map tables")?;

        let mut records = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let record = enrich_match(&self.client, &tables, username, summary)
                .await
                .with_context(|| format!("enriching match {} of {}", summary.match_uid, username))?;
            records.push(record);
        }
        log::info!("{}: enriched {} recent matches", username, records.len());

        Ok(assemble(&profile, &records))
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        log::info!("starting sync for {}", self.username);
        let documents = self.collect(Utc::now()).await?;
        self.publisher
            .publish(&documents)
            .await
            .with_context(|| format!("publishing stats of {}", self.username))?;
        log::info!("sync for {} finished", self.username);
        Ok(())
    }
}
