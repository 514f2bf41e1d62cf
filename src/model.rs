use std::fmt::Display;

/// Player-level summary, rebuilt on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    pub username: String,
    pub rank: String,
    pub level: String,
    pub hero: String,
    pub ranked_games: u32,
    pub ranked_wins: u32,
    pub win_rate: String,
    pub ranked_kills: u32,
    pub ranked_deaths: u32,
    pub ranked_assists: u32,
    pub kda: f64,
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Win,
    NoResult,
}

impl From<u8> for Outcome {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Loss,
            1 => Self::Win,
            _ => Self::NoResult,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Loss => "Loss",
            Outcome::Win => "Win",
            Outcome::NoResult => "No Result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum GameMode {
    QuickMatch,
    Ranked,
    Other,
}

impl From<u32> for GameMode {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::QuickMatch,
            2 => Self::Ranked,
            _ => Self::Other,
        }
    }
}

impl Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameMode::QuickMatch => "Quick Match",
            GameMode::Ranked => "Ranked",
            GameMode::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A match from the player's history joined with its detail.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub match_uid: String,
    pub mode: GameMode,
    pub start_time: String,
    pub map: String,
    pub season: String,
    pub outcome: Outcome,
    pub score: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub damage: u64,
    pub damage_taken: u64,
    pub healing: u64,
    pub hero: String,
}
