// response definitions of the stats api

use serde::Deserialize;

pub mod matches;
pub mod player;

// the api is loose about json types, so a few fields go through these
mod lenient {
    use chrono::{DateTime, Utc};
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_json::Value;

    pub fn id<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| D::Error::custom(format!("invalid id: {}", n))),
            Value::String(s) => s.trim().parse().map_err(D::Error::custom),
            other => Err(D::Error::custom(format!("invalid id: {}", other))),
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(D::Error::custom(format!("expected text, got {}", other))),
        }
    }

    // epoch seconds or rfc3339, either as number or string
    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let from_epoch = |secs: i64| {
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", secs)))
        };
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(n) => {
                let secs = n
                    .as_i64()
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", n)))?;
                from_epoch(secs).map(Some)
            }
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(secs) => from_epoch(secs).map(Some),
                Err(_) => DateTime::parse_from_rfc3339(s.trim())
                    .map(|time| Some(time.with_timezone(&Utc)))
                    .map_err(D::Error::custom),
            },
            other => Err(D::Error::custom(format!("invalid timestamp: {}", other))),
        }
    }

    // `[10, 13]` or `{"0": 10, "1": 13}`
    pub fn scores<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let score = |value: &Value| {
            value
                .as_f64()
                .filter(|v| *v >= 0.0)
                .map(|v| v.round() as u32)
                .ok_or_else(|| D::Error::custom(format!("invalid score: {}", value)))
        };
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(values) => values.iter().map(score).collect(),
            Value::Object(map) => {
                let mut entries = map.iter().collect::<Vec<_>>();
                entries.sort_by_key(|(key, _)| key.parse::<u32>().unwrap_or(u32::MAX));
                entries.into_iter().map(|(_, value)| score(value)).collect()
            }
            other => Err(D::Error::custom(format!("invalid scores: {}", other))),
        }
    }

    pub fn result_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(win) => Ok(u8::from(win)),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| D::Error::custom(format!("invalid result code: {}", n))),
            other => Err(D::Error::custom(format!("invalid result code: {}", other))),
        }
    }
}

/// Listing endpoints answer either with a bare array or with the array wrapped
/// in an object.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "heroes", alias = "maps", alias = "match_history")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Hero {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u32,
    pub name: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct GameMap {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u32,
    pub name: String,
}
