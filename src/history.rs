use std::cmp::Reverse;

use itertools::Itertools;

use crate::{
    client::{Client, RequestError},
    rivals::matches::MatchSummary,
};

const HISTORY_LIMIT: u8 = 10;
pub const RECENT_MATCHES: usize = 5;

/// Newest first, at most `count` entries.
pub fn most_recent(matches: Vec<MatchSummary>, count: usize) -> Vec<MatchSummary> {
    matches
        .into_iter()
        .sorted_by_key(|mat| Reverse(mat.match_time_stamp))
        .take(count)
        .collect()
}

pub async fn fetch_recent_matches(
    client: &Client,
    username: &str,
) -> Result<Vec<MatchSummary>, RequestError> {
    let history = client
        .get_match_history(username, 0, HISTORY_LIMIT)
        .await?;
    log::debug!("retrieved {} matches of {}", history.len(), username);
    Ok(most_recent(history, RECENT_MATCHES))
}
