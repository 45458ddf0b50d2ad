mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::LlmChat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::HostConfig::from_env()?;

    // Initialize LLM client (non-fatal: idea assistant answers with demo data).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; idea assistant in demo mode");
            None
        }
    };

    let payments = match services::stripe::StripeConfig::from_env().and_then(services::stripe::StripeClient::new) {
        Ok(client) => {
            tracing::info!("payment provider initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "payment provider not configured; payment endpoints disabled");
            None
        }
    };

    let state = state::AppState::new(llm, payments, config.public_origin.clone());
    let app = routes::leptos_app(state)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "nichenet listening");
    axum::serve(listener, app).await?;
    Ok(())
}
