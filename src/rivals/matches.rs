use serde::Deserialize;

use super::lenient;

/// One entry of `GET /player/{username}/match-history`.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MatchSummary {
    #[serde(deserialize_with = "lenient::text")]
    pub match_uid: String,
    pub match_time_stamp: i64,
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_map_id: u32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub match_season: String,
    #[serde(default, deserialize_with = "lenient::id")]
    pub game_mode_id: u32,
    #[serde(default, deserialize_with = "lenient::scores")]
    pub score_info: Vec<u32>,
}

#[derive(Deserialize, Copy, Clone, Debug, Default)]
pub struct PlayerHero {
    #[serde(deserialize_with = "lenient::id")]
    pub hero_id: u32,
    #[serde(default)]
    pub play_time: f64,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct MatchPlayer {
    pub nick_name: String,
    #[serde(default, deserialize_with = "lenient::result_code")]
    pub is_win: u8,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub total_damage_taken: f64,
    #[serde(default)]
    pub total_hero_heal: f64,
    #[serde(default)]
    pub total_hero_damage: f64,
    #[serde(default)]
    pub player_heroes: Vec<PlayerHero>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct MatchDetails {
    #[serde(default)]
    pub match_players: Vec<MatchPlayer>,
}

/// `GET /match/{match_uid}`
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MatchDetailResponse {
    pub match_details: MatchDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rivals::Listing;

    #[test]
    fn test_decode_history_with_object_scores() {
        let content = r#"{"match_history": [{
            "match_uid": "5081915_1734689911_1032_11001_10",
            "match_time_stamp": 1734689911,
            "match_map_id": 1032,
            "match_season": 1,
            "game_mode_id": 2,
            "score_info": {"0": 3, "1": 1}
        }]}"#;
        let history: Listing<MatchSummary> = serde_json::from_str(content).unwrap();
        let history = history.into_items();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].match_season, "1");
        assert_eq!(history[0].game_mode_id, 2);
        assert_eq!(history[0].score_info, vec![3, 1]);
    }

    #[test]
    fn test_decode_detail() {
        let content = r#"{"match_details": {"match_players": [{
            "nick_name": "Tester",
            "is_win": true,
            "kills": 12, "deaths": 3, "assists": 7,
            "total_damage_taken": 8123.4,
            "total_hero_heal": 0.0,
            "total_hero_damage": 15432.6,
            "player_heroes": [{"hero_id": "1029", "play_time": 500.2}]
        }]}}"#;
        let detail: MatchDetailResponse = serde_json::from_str(content).unwrap();
        let player = &detail.match_details.match_players[0];
        assert_eq!(player.is_win, 1);
        assert_eq!(player.player_heroes[0].hero_id, 1029);
    }
}
