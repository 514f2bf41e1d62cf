use std::collections::BTreeMap;

use crate::model::{MatchRecord, PlayerProfile};

pub const MATCH_SLOTS: usize = 5;

/// Flat key/value document understood by the display plugin.
pub type MergeVariables = BTreeMap<String, String>;

// the display caps the size of a single update, so the summary and the match
// slots go out as two separate documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documents {
    pub summary: MergeVariables,
    pub matches: MergeVariables,
}

const MATCH_FIELDS: [&str; 10] = [
    "outcome",
    "score",
    "start_time",
    "map",
    "hero",
    "kills",
    "deaths",
    "assists",
    "damage",
    "healing",
];

fn match_values(record: &MatchRecord) -> [String; 10] {
    [
        record.outcome.to_string(),
        record.score.clone(),
        record.start_time.clone(),
        record.map.clone(),
        record.hero.clone(),
        record.kills.to_string(),
        record.deaths.to_string(),
        record.assists.to_string(),
        record.damage.to_string(),
        record.healing.to_string(),
    ]
}

pub fn slot_key(slot: usize, field: &str) -> String {
    format!("m{}_{}", slot, field)
}

pub fn summary_document(profile: &PlayerProfile, season: &str) -> MergeVariables {
    [
        ("season", season.to_string()),
        ("name", profile.username.clone()),
        ("rank", profile.rank.clone()),
        ("level", profile.level.clone()),
        ("hero", profile.hero.clone()),
        ("ranked_games", profile.ranked_games.to_string()),
        ("ranked_wins", profile.ranked_wins.to_string()),
        ("win_rate", profile.win_rate.clone()),
        ("ranked_kills", profile.ranked_kills.to_string()),
        ("kda", profile.kda.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

/// Every slot is always present; slots without a match carry empty strings so
/// a deep merge clears whatever the display showed before.
pub fn matches_document(records: &[MatchRecord]) -> MergeVariables {
    let mut document = MergeVariables::new();
    for slot in 0..MATCH_SLOTS {
        let values = records
            .get(slot)
            .map(match_values)
            .unwrap_or_else(|| std::array::from_fn(|_| String::new()));
        for (field, value) in MATCH_FIELDS.iter().zip(values) {
            document.insert(slot_key(slot, field), value);
        }
    }
    document
}

/// `records` is expected newest first; the season shown is the newest match's.
pub fn assemble(profile: &PlayerProfile, records: &[MatchRecord]) -> Documents {
    let season = records
        .first()
        .map(|record| record.season.as_str())
        .unwrap_or_default();
    Documents {
        summary: summary_document(profile, season),
        matches: matches_document(records),
    }
}
