use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Rank {
    #[serde(default, deserialize_with = "lenient::text")]
    pub rank: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PlayerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub level: String,
    #[serde(default)]
    pub rank: Rank,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct HeroUsage {
    #[serde(default, deserialize_with = "lenient::id")]
    pub hero_id: u32,
    #[serde(default)]
    pub hero_name: String,
    #[serde(default)]
    pub play_time: f64,
}

#[derive(Deserialize, Copy, Clone, Debug, Default)]
pub struct RankedTotals {
    #[serde(default)]
    pub total_matches: u32,
    #[serde(default)]
    pub total_wins: u32,
    #[serde(default)]
    pub total_kills: u32,
    #[serde(default)]
    pub total_deaths: u32,
    #[serde(default)]
    pub total_assists: u32,
}

#[derive(Deserialize, Copy, Clone, Debug, Default)]
pub struct OverallStats {
    #[serde(default)]
    pub ranked: RankedTotals,
}

#[derive(Deserialize, Copy, Clone, Debug, Default)]
pub struct Updates {
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_update_request: Option<DateTime<Utc>>,
}

/// `GET /player/{username}`
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PlayerResponse {
    pub name: String,
    #[serde(default)]
    pub player: PlayerInfo,
    #[serde(default)]
    pub heroes_ranked: Vec<HeroUsage>,
    #[serde(default)]
    pub overall_stats: OverallStats,
    #[serde(default)]
    pub updates: Updates,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_decode_player() {
        let content = r#"{
            "name": "Tester",
            "uid": 1234567,
            "player": {"name": "Tester", "level": "87", "rank": {"rank": "Gold II", "image": "x.png"}},
            "heroes_ranked": [{"hero_id": 1029, "hero_name": "magik", "play_time": 3600.5}],
            "overall_stats": {"ranked": {"total_matches": 10, "total_wins": 7, "total_kills": 20,
                                         "total_deaths": 5, "total_assists": 10}},
            "updates": {"last_update_request": "2024-12-20T10:00:00Z"}
        }"#;
        let player: PlayerResponse = serde_json::from_str(content).unwrap();
        assert_eq!(player.player.level, "87");
        assert_eq!(player.player.rank.rank, "Gold II");
        assert_eq!(player.heroes_ranked[0].hero_id, 1029);
        assert_eq!(player.overall_stats.ranked.total_wins, 7);
        assert_eq!(
            player.updates.last_update_request,
            Some(Utc.with_ymd_and_hms(2024, 12, 20, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_decode_numeric_level_and_epoch_update() {
        let content = r#"{
            "name": "Tester",
            "player": {"level": 87},
            "updates": {"last_update_request": 1700000000}
        }"#;
        let player: PlayerResponse = serde_json::from_str(content).unwrap();
        assert_eq!(player.player.level, "87");
        assert_eq!(
            player.updates.last_update_request.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert!(player.heroes_ranked.is_empty());
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let result = serde_json::from_str::<PlayerResponse>(r#"{"player": {"level": 1}}"#);
        assert!(result.is_err());
    }
}
