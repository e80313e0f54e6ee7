use std::env;

const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
const DEFAULT_CHAT_GPT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_GPT_MODEL: &str = "gpt-4o-mini";

pub fn load() {
    dotenv::dotenv().ok();
}

pub fn get_optional(var_name: &str) -> Option<String> {
    env::var(var_name)
        .ok()
        // Check if the value is an empty string and return None if so
        .and_then(|val| if val.is_empty() { None } else { Some(val) })
}

/// Settings for a running server, read once at startup and handed to the router.
#[derive(Clone, Debug)]
pub struct Config {
    pub github_base_url: String,
    pub github_token: Option<String>,
    pub chat_gpt_base_url: String,
    pub chat_gpt_api_key: Option<String>,
    pub chat_gpt_model: String,
    pub log_level: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = get_optional("PORT")
            .and_then(|p| {
                p.parse()
                    .inspect_err(|e| eprintln!("Ignoring invalid PORT '{p}': {e}"))
                    .ok()
            })
            .unwrap_or(defaults.port);

        Self {
            github_base_url: get_optional("GITHUB_BASE_URL").unwrap_or(defaults.github_base_url),
            github_token: get_optional("GITHUB_TOKEN"),
            chat_gpt_base_url: get_optional("CHAT_GPT_BASE_URL")
                .unwrap_or(defaults.chat_gpt_base_url),
            chat_gpt_api_key: get_optional("CHAT_GPT_API_KEY"),
            chat_gpt_model: get_optional("CHAT_GPT_MODEL").unwrap_or(defaults.chat_gpt_model),
            log_level: get_optional("LOG_LEVEL").unwrap_or(defaults.log_level),
            port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            github_token: None,
            chat_gpt_base_url: DEFAULT_CHAT_GPT_BASE_URL.to_string(),
            chat_gpt_api_key: None,
            chat_gpt_model: DEFAULT_CHAT_GPT_MODEL.to_string(),
            log_level: "INFO".to_string(),
            port: 3000,
        }
    }
}
