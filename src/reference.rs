use std::collections::HashMap;

use thiserror::Error;

use crate::{
    client::{Client, RequestError},
    rivals::{GameMap, Hero},
};

pub const UNKNOWN_MAP: &str = "Unknown Map";
const MAP_LIMIT: u8 = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("Hero {0} is not in the hero table")]
    Hero(u32),
    #[error("Map {0} is not in the map table")]
    Map(u32),
}

/// Lowercases `name`, then capitalizes the first letter of every word.
/// Words are split on whitespace and hyphens.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut boundary = true;
    for ch in name.trim().to_lowercase().chars() {
        if boundary {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        boundary = ch.is_whitespace() || ch == '-';
    }
    result
}

/// Hero and map names, fetched once per run.
#[derive(Debug, Default)]
pub struct ReferenceTables {
    heroes: HashMap<u32, String>,
    maps: HashMap<u32, String>,
}

impl ReferenceTables {
    pub fn new(heroes: Vec<Hero>, maps: Vec<GameMap>) -> Self {
        let mut tables = Self::default();
        // on duplicated ids the first entry wins
        for hero in heroes {
            tables.heroes.entry(hero.id).or_insert(hero.name);
        }
        for map in maps {
            tables.maps.entry(map.id).or_insert(map.name);
        }
        tables
    }

    pub async fn fetch(client: &Client) -> Result<Self, RequestError> {
        let heroes = client.get_heroes().await?;
        let maps = client.get_maps(MAP_LIMIT).await?;
        log::debug!("loaded {} heroes and {} maps", heroes.len(), maps.len());
        Ok(Self::new(heroes, maps))
    }

    pub fn find_hero(&self, id: u32) -> Result<String, LookupError> {
        self.heroes
            .get(&id)
            .map(|name| title_case(name))
            .ok_or(LookupError::Hero(id))
    }

    pub fn find_map(&self, id: u32) -> Result<&str, LookupError> {
        self.maps
            .get(&id)
            .map(String::as_str)
            .ok_or(LookupError::Map(id))
    }

    /// Display name of a hero, empty when the id is unknown.
    pub fn hero_name(&self, id: u32) -> String {
        self.find_hero(id).unwrap_or_else(|err| {
            log::warn!("{}", err);
            String::new()
        })
    }

    pub fn map_name(&self, id: u32) -> String {
        match self.find_map(id) {
            Ok(name) => name.to_string(),
            Err(err) => {
                log::warn!("{}", err);
                UNKNOWN_MAP.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        let heroes = vec![
            Hero {
                id: 1011,
                name: "hulk".to_string(),
            },
            Hero {
                id: 1034,
                name: "iron man".to_string(),
            },
            Hero {
                id: 1036,
                name: "SPIDER-MAN".to_string(),
            },
            Hero {
                id: 1011,
                name: "bruce banner".to_string(),
            },
        ];
        let maps = vec![GameMap {
            id: 1032,
            name: "Yggsgard: Yggdrasill Path".to_string(),
        }];
        ReferenceTables::new(heroes, maps)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("iron man"), "Iron Man");
        assert_eq!(title_case("SPIDER-MAN"), "Spider-Man");
        assert_eq!(title_case("jeff the land shark"), "Jeff The Land Shark");
        assert_eq!(title_case("  mister fantastic "), "Mister Fantastic");
        assert_eq!(title_case("cloak & dagger"), "Cloak & Dagger");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_hero_lookup() {
        let tables = tables();
        assert_eq!(tables.hero_name(1034), "Iron Man");
        assert_eq!(tables.hero_name(1036), "Spider-Man");
        // first entry wins on duplicated ids
        assert_eq!(tables.hero_name(1011), "Hulk");
        assert_eq!(tables.find_hero(9999), Err(LookupError::Hero(9999)));
        assert_eq!(tables.hero_name(9999), "");
    }

    #[test]
    fn test_unknown_map() {
        let tables = tables();
        assert_eq!(tables.map_name(1032), "Yggsgard: Yggdrasill Path");
        assert_eq!(tables.find_map(1), Err(LookupError::Map(1)));
        assert_eq!(tables.map_name(1), UNKNOWN_MAP);
    }

    #[tokio::test]
    async fn test_fetch_tables() {
        let mut server = mockito::Server::new_async().await;
        let heroes = server
            .mock("GET", "/heroes")
            .with_status(200)
            .with_body(r#"[{"id": "1034", "name": "iron man"}]"#)
            .expect(1)
            .create_async()
            .await;
        let maps = server
            .mock("GET", mockito::Matcher::Regex(r"^/maps(\?.*)?$".into()))
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "50".into()))
            .with_status(200)
            .with_body(r#"{"maps": [{"id": 1032, "name": "Klyntar: Symbiotic Surface"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "secret", None, std::time::Duration::from_secs(5))
            .unwrap();
        let tables = ReferenceTables::fetch(&client).await.unwrap();
        assert_eq!(tables.hero_name(1034), "Iron Man");
        assert_eq!(tables.map_name(1032), "Klyntar: Symbiotic Surface");
        heroes.assert_async().await;
        maps.assert_async().await;
    }
}
