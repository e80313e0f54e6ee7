pub mod pull_request;
pub mod repository;
pub use pull_request::{ChangedFile, GithubPrInfo, PullRequest, PullRequestFile};
pub use repository::{PrNumber, Repository};

use crate::utils::config::Config;
use reqwest::RequestBuilder;

/// Read-only client for the GitHub REST API.
#[derive(Clone)]
pub struct Github {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Github {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.github_base_url.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "PRPilot");

        // Unauthenticated calls work but are rate limited harder
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
