use axum::{routing::{get, post}, Router, extract::State, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::SignalService;
use crate::error::SignalError;
use crate::models::{IngestOutcome, PriceObservation, StatusReport};

#[derive(Clone)]
pub struct AppState {
  pub service: Arc<SignalService>,
}

#[derive(Debug, Serialize)]
struct Health { status: &'static str }

#[derive(Debug, Serialize)]
struct ErrorBody { error: String }

/// SignalError -> HTTP 응답
pub struct ApiError(pub SignalError);

impl From<SignalError> for ApiError {
  fn from(e: SignalError) -> Self {
    ApiError(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      SignalError::InvalidParameter(_) | SignalError::ParseError(_) => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      log::error!("request failed: {}", self.0);
    }
    (status, axum::Json(ErrorBody { error: self.0.to_string() })).into_response()
  }
}

pub fn build_router(state: AppState) -> Router {
  let cors = CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);
  // tracing 이벤트는 `log` 기능으로 env_logger 에 전달된다
  let trace = TraceLayer::new_for_http()
    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
    .on_response(DefaultOnResponse::new().level(Level::INFO));

  Router::new()
    .route("/health", get(|| async { axum::Json(Health { status: "ok" }) }))
    .route("/api/price", post(receive_price))
    .route("/api/status", get(status))
    .with_state(state)
    .layer(trace)
    .layer(cors)
}

async fn receive_price(State(state): State<AppState>, axum::Json(req): axum::Json<PriceObservation>) -> Result<axum::Json<IngestOutcome>, ApiError> {
  let outcome = state.service.ingest(&req)?;
  Ok(axum::Json(outcome))
}

async fn status(State(state): State<AppState>) -> Result<axum::Json<StatusReport>, ApiError> {
  Ok(axum::Json(state.service.status()?))
}
