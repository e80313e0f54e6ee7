pub mod middleware;
pub mod routes;

use axum::{
    Router,
    http::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    routing::{get, post},
};
use shared::{
    services::{ChatGpt, Github},
    utils::config::Config,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub github: Github,
    pub chat_gpt: ChatGpt,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::new();

        Self {
            github: Github::new(client.clone(), config),
            chat_gpt: ChatGpt::new(client, config),
        }
    }
}

pub fn app(config: &Config) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_headers([ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, ORIGIN])
        .allow_methods(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/", get(routes::page::index))
        .route(
            "/api/analyze-pr",
            post(routes::github::pull_request::analyze),
        )
        .with_state(AppState::new(config))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().gzip(true).deflate(true))
}
