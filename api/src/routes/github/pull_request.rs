use crate::{AppState, middleware::validation::LenientJson};
use axum::{Json, extract::State};
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use shared::{
    ai::AnalysisResponse,
    services::github::{PrNumber, Repository},
    utils::error::AppError,
};

pub async fn analyze(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let repo = Repository::from_url(request.repo_url())?;
    let number = PrNumber::parse(&request.pr_number())?;

    tracing::info!("Analysing {repo} pull request #{number}");

    let gh_info = state.github.get_pr_info(&repo, number).await?;
    let response = AnalysisResponse::new(&state.chat_gpt, gh_info).await?;

    if response.raw_model_output.is_some() {
        tracing::warn!("Returning unparsed analysis for {repo} pull request #{number}");
    }

    Ok((StatusCode::OK, Json(response)))
}

/// Fields are kept as raw JSON so a badly typed value only invalidates itself.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    repo_url: Value,
    #[serde(default)]
    pr_number: Value,
}

impl AnalyzeRequest {
    pub fn repo_url(&self) -> &str {
        self.repo_url.as_str().unwrap_or_default().trim()
    }

    /// Form inputs arrive as strings, other clients tend to send numbers.
    pub fn pr_number(&self) -> String {
        match &self.pr_number {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => match (number.as_u64(), number.as_f64()) {
                (Some(n), _) => n.to_string(),
                (None, Some(f)) if f.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&f) => {
                    (f as u64).to_string()
                }
                _ => number.to_string(),
            },
            _ => String::new(),
        }
    }
}
