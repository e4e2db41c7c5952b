use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use herald_core::ValidationError;
use herald_ports::HeraldError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::application::{
    IngestSignalUseCase, ListTradesUseCase, QuerySignalsUseCase, RecordTradeCommand,
    RecordTradeUseCase, UpdateTradeStatusCommand, UpdateTradeStatusUseCase,
};
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /
pub async fn health() -> &'static str {
    "Server is running"
}

/// POST /api/signal
pub async fn ingest_signal(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let empty = || ApiError::bad_request(ValidationError::EmptyPayload.to_string());

    let raw = std::str::from_utf8(&body).map_err(|_| empty())?;

    let use_case = IngestSignalUseCase::new(Arc::clone(&state.signals), Arc::clone(&state.hub));
    match use_case.execute(raw).await {
        Ok(_) => Ok(Json(MessageResponse::new("Signal received"))),
        Err(HeraldError::Validation(e)) => {
            warn!(error = %e, "Rejected signal");
            Err(empty())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/signals
pub async fn list_signals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SignalResponse>>, ApiError> {
    let use_case = QuerySignalsUseCase::new(Arc::clone(&state.signals));
    let signals = use_case.list().await?;
    Ok(Json(signals.into_iter().map(SignalResponse::from).collect()))
}

/// GET /api/signals/{id}
pub async fn get_signal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SignalResponse>, ApiError> {
    let id = parse_id(&id)?;
    let use_case = QuerySignalsUseCase::new(Arc::clone(&state.signals));
    Ok(Json(use_case.get(id).await?.into()))
}

/// GET /api/trades
pub async fn list_trades(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TradeResponse>>, ApiError> {
    let use_case = ListTradesUseCase::new(Arc::clone(&state.trades));
    let trades = use_case.execute().await?;
    Ok(Json(trades.into_iter().map(TradeResponse::from).collect()))
}

/// POST /api/trades
pub async fn create_trade(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<TradeResponse>), ApiError> {
    let request: CreateTradeRequest = parse_body(&body)?;

    let use_case = RecordTradeUseCase::new(Arc::clone(&state.signals), Arc::clone(&state.trades));
    let trade = use_case
        .execute(RecordTradeCommand {
            signal_id: request.signal_id,
            fields: request.fields(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(trade.into())))
}

/// PATCH /api/trades/{id}
pub async fn update_trade_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<TradeResponse>, ApiError> {
    let trade_id = parse_id(&id)?;
    let request: UpdateTradeStatusRequest = parse_body(&body)?;

    let use_case = UpdateTradeStatusUseCase::new(Arc::clone(&state.trades));
    let trade = use_case
        .execute(UpdateTradeStatusCommand {
            trade_id,
            status: request.status,
        })
        .await?;

    Ok(Json(trade.into()))
}

// Bodies are parsed here rather than with `Json` so that every rejection
// carries the same `{"message": ...}` shape.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::invalid_body("body must not be empty"));
    }
    serde_json::from_slice(body).map_err(ApiError::invalid_body)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid id '{}'", raw)))
}
