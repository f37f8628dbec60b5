mod config;
mod errors;
mod export;
mod generation;
mod history;
mod llm_client;
mod models;
mod routes;
mod speech;
mod state;
mod templates;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::DocumentExporter;
use crate::history::SessionRegistry;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::speech::CommandSpeechEngine;
use crate::state::AppState;
use crate::templates::Templates;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Playbook Generator v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let api_key = config.groq_api_key.clone().unwrap_or_else(|| {
        warn!("GROQ_API_KEY is not set; every generation will fail to authenticate");
        String::new()
    });
    let llm = LlmClient::new(api_key);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize speech engine
    let speech = match &config.speech_command {
        Some(command) => CommandSpeechEngine::from_command_line(command)?,
        None => CommandSpeechEngine::platform_default(),
    };
    info!("Speech engine: {}", speech.program());

    let exporter = DocumentExporter::new(config.export_dir.clone());
    info!("Exporting playbooks to {}", exporter.output_dir().display());

    let templates = Templates::new()?;

    // Build app state
    let state = AppState {
        completion: Arc::new(llm),
        speech: Arc::new(speech),
        exporter,
        sessions: SessionRegistry::new(),
        templates,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
