//! Tessera dashboard server
//!
//! Serves the built front end and the data files it reads, built with Axum.
//!
//! # Endpoints
//!
//! ## Data
//! - `GET|HEAD /data/*` - Data files from the configured data directory
//!
//! ## API
//! - `GET /api/v1/metadata` - Metadata, age and field names of the data file
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Every other path falls back to the static root, with `index.html` for
//! paths that don't name a file.
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera::config::Config;
//! use tessera::server::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     serve(AppState::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::data::DATA_BASE_PATH;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let api_routes = Router::new().route("/metadata", get(routes::metadata::get_metadata));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let data_service = ServeDir::new(&config.server.data_dir);
    let index = Path::new(&config.server.static_root).join("index.html");
    let static_service = ServeDir::new(&config.server.static_root).fallback(ServeFile::new(index));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .nest_service(&data_mount(&config.data.base_path), data_service)
        .fallback_service(static_service)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_origins))
        .with_state(shared_state)
}

/// Mount point for the data directory, always a non-root absolute path
fn data_mount(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        DATA_BASE_PATH.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::HEAD])
}

/// Start the server and run until a shutdown signal arrives
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.server.addr();
    tracing::info!(
        static_root = %state.config.server.static_root,
        data_dir = %state.config.server.data_dir,
        "Serving dashboard"
    );

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Tessera listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Tessera shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::{DataLoader, HttpFetcher};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    const MONTHLY: &str = r#"{
        "metadata": {"source": "Google Sheets", "sheet": "Monthly", "fetched_at": "2024-01-15T10:30:00Z", "row_count": 2},
        "data": [
            {"period": "2024-01", "revenue": 1200, "expenses": 800},
            {"period": "2024-02", "revenue": 1500, "expenses": 900, "note": "launch"}
        ]
    }"#;

    fn create_test_app(with_data: bool) -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let static_root = dir.path().join("dist");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::create_dir_all(&static_root).unwrap();
        std::fs::write(static_root.join("index.html"), "<html>tessera</html>").unwrap();
        if with_data {
            std::fs::write(data_dir.join("monthly_data.json"), MONTHLY).unwrap();
        }

        let mut config = Config::default();
        config.server.data_dir = data_dir.to_string_lossy().to_string();
        config.server.static_root = static_root.to_string_lossy().to_string();

        (build_router(AppState::new(config)), dir)
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _dir) = create_test_app(false);

        let (status, _) = send(app.clone(), "GET", "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app.clone(), "GET", "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["data_configured"], false);
    }

    #[tokio::test]
    async fn test_health_reports_configured() {
        let (app, _dir) = create_test_app(true);
        let (_, body) = send(app, "GET", "/health").await;
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(health["data_configured"], true);
    }

    #[tokio::test]
    async fn test_data_file_get_and_head() {
        let (app, _dir) = create_test_app(true);

        let (status, body) = send(app.clone(), "GET", "/data/monthly_data.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Google Sheets"));

        let (status, body) = send(app, "HEAD", "/data/monthly_data.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_file_is_404() {
        let (app, _dir) = create_test_app(false);
        let (status, _) = send(app.clone(), "HEAD", "/data/monthly_data.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(app, "GET", "/data/monthly_data.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metadata_not_configured() {
        let (app, _dir) = create_test_app(false);
        let (status, body) = send(app, "GET", "/api/v1/metadata").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"]["code"], "NOT_CONFIGURED");
        assert!(error["request_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_metadata() {
        let (app, _dir) = create_test_app(true);
        let (status, body) = send(app, "GET", "/api/v1/metadata").await;
        assert_eq!(status, StatusCode::OK);

        let metadata: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(metadata["source"], "Google Sheets");
        assert_eq!(metadata["sheet"], "Monthly");
        assert_eq!(metadata["row_count"], 2);
        assert_eq!(metadata["rows"], 2);
        assert!(metadata["age"].as_str().unwrap().ends_with("ago"));
        let fields: Vec<&str> = metadata["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f.as_str())
            .collect();
        assert!(fields.contains(&"revenue"));
        assert!(fields.contains(&"note"));
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let (app, _dir) = create_test_app(false);

        let (status, body) = send(app.clone(), "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("tessera"));

        // Client-side paths get the app shell
        let (status, body) = send(app, "GET", "/budget").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("tessera"));
    }

    #[tokio::test]
    async fn test_loader_over_http() {
        let (app, _dir) = create_test_app(true);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let loader = DataLoader::new(HttpFetcher::new(format!("http://{}", addr)).unwrap());
        assert!(loader.has_data_configured().await);

        let monthly = loader.load_monthly_data().await.unwrap();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly.data[0].period_label(), "2024-01");
        assert_eq!(monthly.metadata.sheet.as_deref(), Some("Monthly"));
    }

    #[test]
    fn test_data_mount() {
        assert_eq!(data_mount("/data"), "/data");
        assert_eq!(data_mount("files/"), "/files");
        assert_eq!(data_mount("/"), DATA_BASE_PATH);
    }
}
