//! StatMuse reference links
//!
//! StatMuse has no public API; queries map to `ask` URLs on their site.
//! The aggregator attaches these as reference material, best effort.

use crate::error::Result;
use reqwest::Client;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Clone)]
pub struct StatMuseClient {
    http: Client,
    base_url: String,
}

impl StatMuseClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn ask_url(&self, question: &str) -> String {
        let slug = question
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}/ask/{}", self.base_url, slug)
    }

    /// Reference URL for a player's career stats, verified reachable.
    /// Returns None when StatMuse does not answer.
    pub async fn career_stats_url(&self, player_name: &str) -> Result<Option<String>> {
        let url = self.ask_url(&format!("{} career stats", player_name));
        let resp = self.http.get(&url).send().await?;
        if resp.status().is_success() {
            Ok(Some(url))
        } else {
            Ok(None)
        }
    }
}
