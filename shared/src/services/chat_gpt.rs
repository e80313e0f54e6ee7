use crate::utils::{config::Config, error::AppError};
use serde::Deserialize;
use serde_json::json;

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_TOKENS: u32 = 800;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatGpt {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatGpt {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.chat_gpt_base_url.trim_end_matches('/').to_string(),
            api_key: config.chat_gpt_api_key.clone(),
            model: config.chat_gpt_model.clone(),
        }
    }

    /// Sends a system and user message and returns the text of the first choice.
    pub async fn make_request(
        &self,
        system_input: &str,
        user_input: String,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("CHAT_GPT_API_KEY is not configured".to_string()))?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("content-type", "application/json")
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "temperature": TEMPERATURE,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    { "role": "system", "content": system_input },
                    { "role": "user", "content": user_input }
                ]
            }))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            tracing::error!("Error making ChatGPT request: {status}");
            return Err(AppError::Upstream(format!("Model request failed: {status}")));
        }

        let content = response
            .json::<ApiResponse>()
            .await?
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream("Model returned no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(content)
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn chat_gpt_for(server: &MockServer, api_key: Option<&str>) -> ChatGpt {
        let config = Config {
            chat_gpt_base_url: server.uri(),
            chat_gpt_api_key: api_key.map(str::to_string),
            chat_gpt_model: "test-model".to_string(),
            ..Default::default()
        };

        ChatGpt::new(reqwest::Client::new(), &config)
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "max_tokens": MAX_TOKENS,
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "hi" } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = chat_gpt_for(&server, Some("key"))
            .make_request("be brief", "hello".to_string())
            .await
            .unwrap();

        assert_eq!(reply, "hi");
    }

    #[tokio::test]
    async fn missing_api_key_is_a_config_error_without_a_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = chat_gpt_for(&server, None)
            .make_request("system", "user".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Config(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn non_success_status_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = chat_gpt_for(&server, Some("key"))
            .make_request("system", "user".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)), "unexpected error: {err:?}");
        assert_eq!(err.to_string(), "Model request failed: 429 Too Many Requests");
    }

    #[tokio::test]
    async fn empty_choices_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = chat_gpt_for(&server, Some("key"))
            .make_request("system", "user".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)), "unexpected error: {err:?}");
    }
}
