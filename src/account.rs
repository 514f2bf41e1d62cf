use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    client::{Client, RequestError},
    model::PlayerProfile,
    reference::title_case,
    rivals::player::PlayerResponse,
};

/// When to ask the API to recompute a player's stats, and how long to wait
/// after a failed profile fetch before the single retry.
#[derive(Debug, Copy, Clone)]
pub struct RefreshPolicy {
    pub stale_after: Duration,
    pub retry_cooldown: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60 * 60),
            retry_cooldown: Duration::from_secs(10 * 60),
        }
    }
}

/// A profile that was never refreshed counts as stale, and so does one
/// refreshed exactly `window` ago.
pub fn is_stale(
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    let Some(last_update) = last_update else {
        return true;
    };
    match TimeDelta::from_std(window) {
        Ok(window) => now - last_update >= window,
        Err(_) => false,
    }
}

/// Whole percent, halves rounded to even.
pub fn win_rate(wins: u32, games: u32) -> String {
    if games == 0 {
        return "0%".to_string();
    }
    let rate = (f64::from(wins) / f64::from(games) * 100.0).round_ties_even();
    format!("{}%", rate)
}

/// (kills + assists) / deaths rounded to two decimals, halves to even; a
/// deathless record divides by one.
pub fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    let deaths = f64::from(deaths.max(1));
    let ratio = (f64::from(kills) + f64::from(assists)) / deaths;
    (ratio * 100.0).round_ties_even() / 100.0
}

impl From<PlayerResponse> for PlayerProfile {
    fn from(value: PlayerResponse) -> Self {
        let ranked = value.overall_stats.ranked;
        let hero = value
            .heroes_ranked
            .iter()
            .max_by(|a, b| a.play_time.total_cmp(&b.play_time))
            .map(|hero| title_case(&hero.hero_name))
            .unwrap_or_default();
        let username = if value.player.name.is_empty() {
            value.name
        } else {
            value.player.name
        };
        Self {
            username,
            rank: value.player.rank.rank,
            level: value.player.level,
            hero,
            ranked_games: ranked.total_matches,
            ranked_wins: ranked.total_wins,
            win_rate: win_rate(ranked.total_wins, ranked.total_matches),
            ranked_kills: ranked.total_kills,
            ranked_deaths: ranked.total_deaths,
            ranked_assists: ranked.total_assists,
            kda: kda(ranked.total_kills, ranked.total_deaths, ranked.total_assists),
        }
    }
}

/// Asks for a stats recomputation without waiting for it to happen. A failure
/// is logged and otherwise ignored; the next scheduled run picks up fresh data.
pub async fn request_refresh(client: &Client, username: &str) {
    match client.request_update(username).await {
        Ok(()) => log::info!("requested a stats refresh for {}", username),
        Err(err) => log::warn!("stats refresh for {} was not accepted: {}", username, err),
    }
}

/// Fetches the player's profile. A failed first fetch triggers a refresh, a
/// cooldown and exactly one retry. A stale profile triggers a refresh but is
/// still used for this run.
pub async fn fetch_account(
    client: &Client,
    username: &str,
    now: DateTime<Utc>,
    policy: &RefreshPolicy,
) -> Result<PlayerProfile, RequestError> {
    let mut refreshed = false;
    let player = match client.get_player(username).await {
        Ok(player) => player,
        Err(err) => {
            log::warn!(
                "fetching profile of {} failed: {}, retrying in {}s",
                username,
                err,
                policy.retry_cooldown.as_secs()
            );
            request_refresh(client, username).await;
            refreshed = true;
            tokio::time::sleep(policy.retry_cooldown).await;
            client.get_player(username).await?
        }
    };

    let last_update = player.updates.last_update_request;
    if !refreshed && is_stale(last_update, now, policy.stale_after) {
        log::info!(
            "stats of {} are stale (last update request: {:?})",
            username,
            last_update
        );
        request_refresh(client, username).await;
    }

    Ok(player.into())
}
