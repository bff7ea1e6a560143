use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lifeprint_api::{
    config::Config,
    db::{create_pool, PostgresRepository},
    routes::{create_router, AppState},
    services::providers::ai_gateway::AiGatewayClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifeprint_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let repository = Arc::new(PostgresRepository::new(pool));
    let gateway = Arc::new(AiGatewayClient::new(
        config.ai_gateway_url.clone(),
        config.ai_gateway_key.clone(),
    ));

    let state = AppState::new(repository, gateway, &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "lifeprint-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
