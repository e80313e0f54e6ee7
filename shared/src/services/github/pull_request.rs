use super::{Github, PrNumber, Repository};
use crate::utils::{error::AppError, text::truncate_chars};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MAX_CHANGED_FILES: usize = 10;
pub const MAX_PATCH_CHARS: usize = 2000;

#[derive(Deserialize, Debug)]
pub struct PullRequest {
    pub title: String,
    pub body: Option<String>,
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
}

#[derive(Deserialize, Debug)]
pub struct PullRequestFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub changes: u64,
    pub patch: Option<String>,
}

/// What the analysis gets to see of a pull request, echoed back to the caller as `ghInfo`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GithubPrInfo {
    pub pr_title: String,
    pub pr_body: Option<String>,
    pub author: Option<String>,
    pub changed_files: Vec<ChangedFile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChangedFile {
    pub filename: String,
    pub status: String,
    pub changes: u64,
    pub patch: Option<String>,
}

impl From<PullRequestFile> for ChangedFile {
    fn from(file: PullRequestFile) -> Self {
        Self {
            patch: file
                .patch
                .as_deref()
                .map(|p| truncate_chars(p, MAX_PATCH_CHARS).to_string()),
            filename: file.filename,
            status: file.status,
            changes: file.changes,
        }
    }
}

impl GithubPrInfo {
    pub fn new(pr: PullRequest, files: Vec<PullRequestFile>) -> Self {
        Self {
            pr_title: pr.title,
            pr_body: pr.body,
            author: pr.user.map(|u| u.login),
            changed_files: files
                .into_iter()
                .take(MAX_CHANGED_FILES)
                .map(ChangedFile::from)
                .collect(),
        }
    }
}

impl Github {
    pub async fn get_pr_info(
        &self,
        repo: &Repository,
        number: PrNumber,
    ) -> Result<GithubPrInfo, AppError> {
        let pr = self.get_pull_request(repo, number).await?;

        // The file listing only enriches the analysis, so a failure here is not fatal
        let files = self
            .get_pull_request_files(repo, number)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(
                    "Error fetching {repo} PR #{number} files, continuing without: {err}"
                );
                Vec::new()
            });

        Ok(GithubPrInfo::new(pr, files))
    }

    pub async fn get_pull_request(
        &self,
        repo: &Repository,
        number: PrNumber,
    ) -> Result<PullRequest, AppError> {
        tracing::info!("Fetching {repo} pull request #{number}");

        let response = self.get(&repo.pull_request_path(number)).send().await?;

        let status = response.status();

        if !status.is_success() {
            tracing::error!("Error fetching {repo} PR #{number}: {status}");
            return Err(AppError::Upstream(format!("GitHub PR fetch failed: {status}")));
        }

        let pull_request = response.json::<PullRequest>().await?;

        Ok(pull_request)
    }

    /// First page only, so at most GitHub's default page size of files.
    pub async fn get_pull_request_files(
        &self,
        repo: &Repository,
        number: PrNumber,
    ) -> Result<Vec<PullRequestFile>> {
        tracing::info!("Fetching {repo} pull request #{number} files");

        let files = self
            .get(&format!("{}/files", repo.pull_request_path(number)))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PullRequestFile>>()
            .await?;

        Ok(files)
    }
}
