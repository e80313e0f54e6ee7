use super::prompts;
use crate::{
    services::{github::GithubPrInfo, ChatGpt},
    utils::{error::AppError, text::truncate_chars},
};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const PROMPT_MAX_FILES: usize = 8;
pub const PROMPT_PATCH_CHARS: usize = 1200;
pub const PROMPT_BODY_CHARS: usize = 1000;

const UNPARSED_RISKS: &str = "Could not parse AI risk analysis.";
const UNPARSED_TESTS: &str = "Could not parse AI test suggestions.";
const UNPARSED_DOCS: &str = "Could not parse AI documentation snippet.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrAnalysis {
    pub summary: String,
    pub risks: Vec<String>,
    pub tests: Vec<String>,
    pub docs_snippet: String,
}

impl PrAnalysis {
    /// Parses a model reply, tolerating a surrounding Markdown code fence.
    pub fn from_reply(reply: &str) -> serde_json::Result<Self> {
        serde_json::from_str(strip_code_fence(reply))
    }

    /// Stand-in shown when the model reply isn't the JSON we asked for.
    pub fn unparsed(pr_title: &str) -> Self {
        Self {
            summary: format!("{pr_title} (the AI summary could not be parsed)"),
            risks: vec![UNPARSED_RISKS.to_string()],
            tests: vec![UNPARSED_TESTS.to_string()],
            docs_snippet: UNPARSED_DOCS.to_string(),
        }
    }
}

/// Body of a successful `POST /api/analyze-pr`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub analysis: PrAnalysis,
    pub gh_info: GithubPrInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_output: Option<String>,
}

impl AnalysisResponse {
    pub async fn new(chat_gpt: &ChatGpt, gh_info: GithubPrInfo) -> Result<Self, AppError> {
        tracing::info!("Generating PR analysis");

        let reply = chat_gpt
            .make_request(prompts::PR_ANALYSIS, build_user_prompt(&gh_info))
            .await?;

        Ok(Self::from_reply(reply, gh_info))
    }

    pub fn from_reply(reply: String, gh_info: GithubPrInfo) -> Self {
        match PrAnalysis::from_reply(&reply) {
            Ok(analysis) => Self {
                analysis,
                gh_info,
                raw_model_output: None,
            },
            Err(err) => {
                tracing::warn!("Model reply was not valid analysis JSON: {err}");

                Self {
                    analysis: PrAnalysis::unparsed(&gh_info.pr_title),
                    gh_info,
                    raw_model_output: Some(reply),
                }
            }
        }
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop an info string such as `json`
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    inner.trim()
}

pub fn build_user_prompt(gh_info: &GithubPrInfo) -> String {
    let body = gh_info
        .pr_body
        .as_deref()
        .map(|b| truncate_chars(b, PROMPT_BODY_CHARS))
        .unwrap_or_default();

    let mut files = String::new();

    for file in gh_info.changed_files.iter().take(PROMPT_MAX_FILES) {
        let patch = file
            .patch
            .as_deref()
            .map(|p| truncate_chars(p, PROMPT_PATCH_CHARS))
            .unwrap_or("(no textual diff)");

        // Writing to a String can't fail
        let _ = write!(
            files,
            "<File name=\"{}\" status=\"{}\" changes=\"{}\">\n{patch}\n</File>\n",
            file.filename, file.status, file.changes
        );
    }

    format!(
        "<Title>{title}</Title>
         <Author>{author}</Author>
         <Description>{body}</Description>
         <ChangedFiles>\n{files}</ChangedFiles>",
        title = gh_info.pr_title,
        author = gh_info.author.as_deref().unwrap_or("unknown"),
    )
}
