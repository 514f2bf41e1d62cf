use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue},
    Proxy, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::rivals::{
    matches::{MatchDetailResponse, MatchSummary},
    player::PlayerResponse,
    GameMap, Hero, Listing,
};

// we use separate error types for construction and request

#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("ProxyError: {0} from scheme: {1}.")]
    ProxyError(reqwest::Error, String),
    #[error("BuildError: {0}.")]
    BuildError(#[from] reqwest::Error),
    #[error("Invalid base url {0}: {1}.")]
    InvalidUrl(String, String),
    #[error("Invalid api key: {0}.")]
    InvalidKey(#[from] InvalidHeaderValue),
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to retrieve result from stats API: {0}")]
    ConnectionError(#[from] reqwest::Error),
    #[error("Failed to decode stats API response: {0}")]
    DecodeError(serde_json::Error, String),
    #[error("Too Many Requests")]
    TooManyRequests,
    #[error("Unexpected response from {0}: {1}")]
    OtherResponse(Url, StatusCode),
}

/// Builds the underlying http client shared by the stats and display clients.
pub fn build_http(
    proxy: Option<&str>,
    timeout: Duration,
    headers: HeaderMap,
) -> Result<reqwest::Client, ConstructionError> {
    let builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .default_headers(headers);
    let builder = match proxy {
        Some(proxy) => {
            let proxy = Proxy::all(proxy)
                .map_err(|err| ConstructionError::ProxyError(err, proxy.to_string()))?;
            builder.proxy(proxy)
        }
        None => builder,
    };
    Ok(builder.build()?)
}

pub fn parse_base_url(base: &str) -> Result<Url, ConstructionError> {
    let url = Url::parse(base)
        .map_err(|err| ConstructionError::InvalidUrl(base.to_string(), err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConstructionError::InvalidUrl(
            base.to_string(),
            "not a base url".to_string(),
        ));
    }
    Ok(url)
}

/// Appends path segments to `base`, percent-encoding each of them.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // cannot fail, parse_base_url rejects cannot-be-a-base urls
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Client of the stats API. The credential is a default header, so every
/// request made through this client is authenticated.
#[derive(Clone, Debug)]
pub struct Client {
    client: reqwest::Client,
    base: Url,
}

impl Client {
    const API_KEY_HEADER: &str = "x-api-key";

    pub fn new(
        base_url: &str,
        key: &str,
        proxy: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ConstructionError> {
        let base = parse_base_url(base_url)?;
        let mut key = HeaderValue::from_str(key)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(Self::API_KEY_HEADER, key);
        let client = build_http(proxy, timeout, headers)?;
        Ok(Self { client, base })
    }

    pub async fn get_player(&self, username: &str) -> Result<PlayerResponse, RequestError> {
        self.get(&["player", username], &[]).await
    }

    /// Asks the API to recompute the player's stats. The response body carries
    /// nothing we use.
    pub async fn request_update(&self, username: &str) -> Result<(), RequestError> {
        let url = endpoint(&self.base, &["player", username, "update"]);
        let resp = self.client.get(url.clone()).send().await?;
        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(RequestError::TooManyRequests),
            other => Err(RequestError::OtherResponse(url, other)),
        }
    }

    pub async fn get_match_history(
        &self,
        username: &str,
        skip: u32,
        limit: u8,
    ) -> Result<Vec<MatchSummary>, RequestError> {
        let query = [("skip", skip.to_string()), ("limit", limit.to_string())];
        self.get(&["player", username, "match-history"], &query)
            .await
            .map(Listing::into_items)
    }

    pub async fn get_match(&self, match_uid: &str) -> Result<MatchDetailResponse, RequestError> {
        self.get(&["match", match_uid], &[]).await
    }

    pub async fn get_heroes(&self) -> Result<Vec<Hero>, RequestError> {
        self.get(&["heroes"], &[]).await.map(Listing::into_items)
    }

    pub async fn get_maps(&self, limit: u8) -> Result<Vec<GameMap>, RequestError> {
        self.get(&["maps"], &[("limit", limit.to_string())])
            .await
            .map(Listing::into_items)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let url = endpoint(&self.base, segments);
        let req = self.client.get(url.clone()).query(query);
        let resp = req.send().await?;
        match resp.status() {
            status if status.is_success() => {
                let content = resp.text().await?;
                serde_json::from_str(&content).map_err(|err| {
                    log::debug!("undecodable response from {}: {}", url, content);
                    RequestError::DecodeError(err, content)
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(RequestError::TooManyRequests),
            other => Err(RequestError::OtherResponse(url, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> Client {
        Client::new(&server.url(), "secret", None, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = parse_base_url("https://example.com/api/v1/").unwrap();
        let url = endpoint(&base, &["player", "Iron Fist#1", "update"]);
        assert_eq!(
            url.as_str(),
            "https://example.com/api/v1/player/Iron%20Fist%231/update"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Client::new("not a url", "secret", None, Duration::from_secs(5));
        assert!(matches!(result, Err(ConstructionError::InvalidUrl(..))));
    }

    #[tokio::test]
    async fn test_sends_api_key_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Regex(r"^/player/Tester/match-history(\?.*)?$".into()))
            .match_header("x-api-key", "secret")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("skip".into(), "0".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"match_history": []}"#)
            .create_async()
            .await;

        let history = client(&server)
            .get_match_history("Tester", 0, 10)
            .await
            .unwrap();
        assert!(history.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_decode_error_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        let _heroes = server
            .mock("GET", "/heroes")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        match client(&server).get_heroes().await {
            Err(RequestError::DecodeError(_, content)) => {
                assert_eq!(content, "<html>maintenance</html>")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_errors() {
        let mut server = mockito::Server::new_async().await;
        let _player = server
            .mock("GET", "/player/Missing")
            .with_status(404)
            .create_async()
            .await;
        let _busy = server
            .mock("GET", "/match/busy")
            .with_status(429)
            .create_async()
            .await;

        let client = client(&server);
        match client.get_player("Missing").await {
            Err(RequestError::OtherResponse(url, status)) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.path().ends_with("/player/Missing"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            client.get_match("busy").await,
            Err(RequestError::TooManyRequests)
        ));
    }
}
