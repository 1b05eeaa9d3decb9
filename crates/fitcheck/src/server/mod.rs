//! HTTP server: shared state, routing, and startup.

pub mod error;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fitcheck_core::{Classify, Config, OpenRouterClient, OutfitAnalyzer};

/// State shared across request handlers.
pub struct AppState {
    /// Outfit classifier (the CLIP analyzer in production, stubs in tests)
    pub classifier: Arc<dyn Classify>,

    /// OpenRouter chat client
    pub suggester: OpenRouterClient,

    /// Directory uploaded photos are written to
    pub upload_dir: PathBuf,

    /// Model name reported by the health endpoint
    pub model_name: String,
}

/// Build the application router.
///
/// With `server.allowed_origin` set, CORS is pinned to that origin;
/// otherwise any origin may call the API.
pub fn router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = match &config.server.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let max_body_bytes = config.limits.max_upload_mb as usize * 1024 * 1024;

    Ok(Router::new()
        .route("/upload", post(upload::upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.model_name,
    }))
}

/// Load the model, then bind and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let upload_dir = config.upload_dir();
    tokio::fs::create_dir_all(&upload_dir).await?;

    // Model load is CPU and disk heavy; keep it off the async runtime.
    let model_config = config.model.clone();
    let model_dir = config.model_dir();
    let analyzer =
        tokio::task::spawn_blocking(move || OutfitAnalyzer::load(&model_config, &model_dir))
            .await??;

    let suggester = OpenRouterClient::from_config(&config.openrouter)?;

    let state = Arc::new(AppState {
        classifier: Arc::new(analyzer),
        suggester,
        upload_dir,
        model_name: config.model.name.clone(),
    });

    let app = router(state, &config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcheck_core::{AnalysisError, ClassificationResult};

    struct NoopClassifier;

    impl Classify for NoopClassifier {
        fn classify(&self, _image_bytes: &[u8]) -> Result<ClassificationResult, AnalysisError> {
            Ok(ClassificationResult {
                garments: vec![],
                styles: vec![],
            })
        }
    }

    fn test_state() -> Arc<AppState> {
        let config = Config::default();
        let mut openrouter = config.openrouter.clone();
        openrouter.api_key = "sk-test".to_string();
        Arc::new(AppState {
            classifier: Arc::new(NoopClassifier),
            suggester: OpenRouterClient::from_config(&openrouter).unwrap(),
            upload_dir: std::env::temp_dir(),
            model_name: config.model.name.clone(),
        })
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let config = Config::default();
        let app = router(test_state(), &config).unwrap();
        let server = axum_test::TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({
            "status": "ok",
            "model": "clip-vit-base-patch32",
        }));
    }

    #[tokio::test]
    async fn test_router_accepts_pinned_origin() {
        let mut config = Config::default();
        config.server.allowed_origin = Some("http://localhost:5173".to_string());
        assert!(router(test_state(), &config).is_ok());
    }

    #[tokio::test]
    async fn test_router_rejects_invalid_origin() {
        let mut config = Config::default();
        config.server.allowed_origin = Some("bad\norigin".to_string());
        assert!(router(test_state(), &config).is_err());
    }
}
