use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::{
    client::{Client, RequestError},
    model::{GameMode, MatchRecord, Outcome},
    reference::ReferenceTables,
    rivals::matches::{MatchPlayer, MatchSummary},
};

// match times are shown at a fixed UTC-5
const DISPLAY_OFFSET_SECS: i32 = 5 * 60 * 60;
const START_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("Player {0} is missing from match {1}")]
    PlayerMissing(String, String),
}

pub fn format_start_time(epoch_secs: i64) -> String {
    let Some(offset) = FixedOffset::west_opt(DISPLAY_OFFSET_SECS) else {
        return String::new();
    };
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|time| time.with_timezone(&offset).format(START_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// A win shows the higher score first. Anything else shows the lower score
/// first, whichever side the player was on.
pub fn score_line(outcome: Outcome, scores: &[u32]) -> String {
    let first = scores.first().copied().unwrap_or(0);
    let second = scores.get(1).copied().unwrap_or(0);
    let (high, low) = (first.max(second), first.min(second));
    match outcome {
        Outcome::Win => format!("{} - {}", high, low),
        Outcome::Loss | Outcome::NoResult => format!("{} - {}", low, high),
    }
}

pub fn build_record(
    summary: &MatchSummary,
    player: &MatchPlayer,
    tables: &ReferenceTables,
) -> MatchRecord {
    let outcome = Outcome::from(player.is_win);
    let hero = player
        .player_heroes
        .iter()
        .max_by(|a, b| a.play_time.total_cmp(&b.play_time))
        .map(|hero| tables.hero_name(hero.hero_id))
        .unwrap_or_default();
    MatchRecord {
        match_uid: summary.match_uid.clone(),
        mode: GameMode::from(summary.game_mode_id),
        start_time: format_start_time(summary.match_time_stamp),
        map: tables.map_name(summary.match_map_id),
        season: summary.match_season.clone(),
        outcome,
        score: score_line(outcome, &summary.score_info),
        kills: player.kills,
        deaths: player.deaths,
        assists: player.assists,
        // halves to even; negative or NaN values saturate to 0
        damage: player.total_hero_damage.round_ties_even() as u64,
        damage_taken: player.total_damage_taken.round_ties_even() as u64,
        healing: player.total_hero_heal.round_ties_even() as u64,
        hero,
    }
}

/// Fetches the match detail and joins the player's row with the history entry.
/// The row is matched on the exact, case-sensitive nickname.
pub async fn enrich_match(
    client: &Client,
    tables: &ReferenceTables,
    username: &str,
    summary: &MatchSummary,
) -> Result<MatchRecord, EnrichError> {
    let detail = client.get_match(&summary.match_uid).await?;
    let player = detail
        .match_details
        .match_players
        .iter()
        .find(|player| player.nick_name == username)
        .ok_or_else(|| {
            EnrichError::PlayerMissing(username.to_string(), summary.match_uid.clone())
        })?;
    let record = build_record(summary, player, tables);
    log::debug!(
        "match {}: {} {} on {} as {}, {} damage taken",
        record.match_uid,
        record.mode,
        record.outcome,
        record.map,
        record.hero,
        record.damage_taken
    );
    Ok(record)
}
