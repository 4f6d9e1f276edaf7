//! HTTP boundary for the analysis engine.
//!
//! Two routes: a liveness probe at `/` and the analysis endpoint at
//! `/analyze`. The boundary performs the only input validation there is
//! (non-empty content) and maps orchestrator errors to a generic 500 with the
//! error's string representation as detail; transport and validation
//! failures are not distinguished to the caller.

use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

use crate::config::AppConfig;
use crate::errors::{AppError, ConfigError};
use crate::handlers::ai::ModelClient;
use crate::handlers::analysis;
use crate::types::review::AnalysisRequest;

/// Builds the route tree for the engine.
pub fn routes(
    model_name: String,
    client: Arc<dyn ModelClient>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let client_filter = warp::any().map(move || client.clone());
    let model_filter = warp::any().map(move || model_name.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    // Liveness probe - no core involvement
    let health_route = warp::path::end()
        .and(warp::get())
        .and(model_filter)
        .and_then(handle_health);

    // Main entry point for code analysis
    let analyze_route = warp::path("analyze")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(client_filter)
        .and_then(handle_analyze);

    health_route.or(analyze_route).with(cors)
}

async fn handle_health(model_name: String) -> Result<impl warp::Reply, Infallible> {
    let body = serde_json::json!({
        "status": "AI Engine is Running",
        "model": model_name,
    });

    Ok(warp::reply::with_status(
        warp::reply::json(&body),
        StatusCode::OK,
    ))
}

async fn handle_analyze(
    request: AnalysisRequest,
    client: Arc<dyn ModelClient>,
) -> Result<impl warp::Reply, Infallible> {
    if request.content.trim().is_empty() {
        let body = serde_json::json!({ "detail": "Code content cannot be empty" });
        return Ok(warp::reply::with_status(
            warp::reply::json(&body),
            StatusCode::BAD_REQUEST,
        ));
    }

    tracing::info!(
        "Analyzing '{}' ({} bytes, language: {})",
        request.filename,
        request.content.len(),
        request.language
    );

    match analysis::analyze(client.as_ref(), &request.content, &request.language).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::OK,
        )),
        Err(e) => {
            let body = serde_json::json!({ "detail": e.to_string() });
            Ok(warp::reply::with_status(
                warp::reply::json(&body),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Binds the configured listen address and serves until shutdown.
pub async fn serve(config: AppConfig, client: Arc<dyn ModelClient>) -> Result<(), AppError> {
    let addr: std::net::SocketAddr = config
        .server
        .listen_addr
        .parse()
        .map_err(|_| ConfigError::InvalidListenAddr(config.server.listen_addr.clone()))?;

    tracing::info!("AI engine listening on http://{}", addr);

    warp::serve(routes(config.ai.model_name.clone(), client))
        .run(addr)
        .await;

    Ok(())
}
