//! Application startup and lifecycle management.

use crate::build_router;
use crate::config::CompanionConfig;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::CompanionService;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state. Immutable after startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub config: CompanionConfig,
    pub companion: CompanionService,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CompanionConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> = if config.google.enabled {
            tracing::info!(
                model = %config.model.name,
                "Initialized Gemini text provider"
            );
            Arc::new(GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.model.name.clone(),
            }))
        } else {
            tracing::info!("Gemini provider disabled, using mock text provider");
            Arc::new(MockTextProvider::echo())
        };

        let params = GenerationParams {
            temperature: Some(config.model.temperature),
            top_p: Some(config.model.top_p),
            top_k: Some(config.model.top_k),
            max_tokens: Some(config.model.max_output_tokens),
        };
        let companion = CompanionService::new(provider, params);

        let state = AppState {
            config: config.clone(),
            companion,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Companion service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
