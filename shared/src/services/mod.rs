pub mod chat_gpt;
pub mod github;

pub use chat_gpt::ChatGpt;
pub use github::Github;
