use anyhow::Context;

use trellis_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trellis_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    if !config.session_auth {
        tracing::info!("session auth disabled; pages will not vary on Cookie");
    }

    let bind = config.bind;
    let app = trellis_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
