use shared::utils::config::{self, Config};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load();

    let config = Config::from_env();

    let timer = time::format_description::parse("[hour]:[minute]:[second]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(time_offset, timer);

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_ansi(false)
        .with_max_level(Level::from_str(&config.log_level).unwrap_or(Level::INFO))
        .json()
        .init();

    let app = api::app(&config);

    // If compiled in debug mode, run the app as a regular Axum server.
    #[cfg(debug_assertions)]
    {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
        tracing::info!("App listening at http://localhost:{}", config.port);
        axum::serve(listener, app).await?;
    }

    // If compiled in release mode, run the app using the Lambda runtime.
    #[cfg(not(debug_assertions))]
    {
        let app = tower::ServiceBuilder::new()
            .layer(axum_aws_lambda::LambdaLayer::default())
            .service(app);

        lambda_http::run(app).await.map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(())
}
