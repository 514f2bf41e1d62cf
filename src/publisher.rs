use std::time::Duration;

use reqwest::{header::HeaderMap, StatusCode, Url};
use serde::Serialize;
use thiserror::Error;

use crate::{
    client::{build_http, endpoint, parse_base_url, ConstructionError},
    payload::{Documents, MergeVariables},
};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to reach display endpoint: {0}")]
    ConnectionError(#[from] reqwest::Error),
    #[error("Display endpoint {0} rejected the update with {1}: {2}")]
    Rejected(Url, StatusCode, String),
}

#[derive(Serialize)]
struct MergeRequest<'a> {
    merge_variables: &'a MergeVariables,
    deep_merge: bool,
}

/// Posts merge-variable updates to a single display plugin.
pub struct Publisher {
    client: reqwest::Client,
    url: Url,
    delay: Duration,
}

impl Publisher {
    pub fn new(
        base_url: &str,
        plugin_id: &str,
        proxy: Option<&str>,
        timeout: Duration,
        delay: Duration,
    ) -> Result<Self, ConstructionError> {
        let base = parse_base_url(base_url)?;
        let url = endpoint(&base, &["custom_plugins", plugin_id]);
        let client = build_http(proxy, timeout, HeaderMap::new())?;
        Ok(Self { client, url, delay })
    }

    pub async fn post(&self, variables: &MergeVariables) -> Result<(), PublishError> {
        let body = MergeRequest {
            merge_variables: variables,
            deep_merge: true,
        };
        let resp = self.client.post(self.url.clone()).json(&body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let content = resp.text().await.unwrap_or_default();
        Err(PublishError::Rejected(self.url.clone(), status, content))
    }

    /// Sends the summary, waits out the display's update interval, then sends
    /// the match slots. A failed summary stops the run before the delay.
    pub async fn publish(&self, documents: &Documents) -> Result<(), PublishError> {
        self.post(&documents.summary).await?;
        log::info!(
            "summary sent ({} variables), waiting {}s before the match update",
            documents.summary.len(),
            self.delay.as_secs()
        );
        tokio::time::sleep(self.delay).await;
        self.post(&documents.matches).await?;
        log::info!("match update sent ({} variables)", documents.matches.len());
        Ok(())
    }
}
