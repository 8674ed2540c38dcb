//! Axum router and all HTTP handlers for eqt-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Bodies are decoded in-handler from raw bytes so a
//! malformed request still gets the contract envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use eqt_orders::{ApiError, OrderFamily, OrderRequest, MODIFY_SUCCESS_MESSAGE};
use eqt_schemas::{ApiEnvelope, ConversionRequest, OrderBookQuery};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::{api_types::HealthResponse, identity::caller_from_headers, state::AppState};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/orders", get(order_book))
        .route("/v1/orders/normal", post(place_normal).put(modify_normal))
        .route("/v1/orders/bracket", post(place_bracket).put(modify_bracket))
        .route("/v1/orders/cover", post(place_cover).put(modify_cover))
        .route("/v1/positions", get(position_book))
        .route("/v1/positions/convert", post(convert_position))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service.to_string(),
            version: st.build.version.to_string(),
        }),
    )
}

// ---------------------------------------------------------------------------
// POST | PUT /v1/orders/{normal,bracket,cover}
// ---------------------------------------------------------------------------

pub(crate) async fn place_normal(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Normal, false).await
}

pub(crate) async fn modify_normal(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Normal, true).await
}

pub(crate) async fn place_bracket(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Bracket, false).await
}

pub(crate) async fn modify_bracket(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Bracket, true).await
}

pub(crate) async fn place_cover(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Cover, false).await
}

pub(crate) async fn modify_cover(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    submit(&st, &headers, &body, OrderFamily::Cover, true).await
}

async fn submit(
    st: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    family: OrderFamily,
    modify: bool,
) -> Response {
    let op = if modify { "modify_order" } else { "place_order" };
    let span = info_span!("request", request_id = %Uuid::new_v4(), op, %family);

    async move {
        let caller = match caller_from_headers(headers) {
            Ok(c) => c,
            Err(e) => return render_error(e),
        };
        let req = match parse_order(body, family, modify) {
            Ok(r) => r,
            Err(e) => return render_error(e),
        };

        match st.gateway.submit_order(&caller, &req).await {
            Ok(ack) if modify => render(ApiEnvelope::ok(ack).with_message(MODIFY_SUCCESS_MESSAGE)),
            Ok(ack) => render(ApiEnvelope::ok(ack)),
            Err(e) => render_error(e),
        }
    }
    .instrument(span)
    .await
}

fn parse_order(body: &[u8], family: OrderFamily, modify: bool) -> Result<OrderRequest, ApiError> {
    if modify {
        return Ok(OrderRequest::modify(family, decode_body(body)?));
    }
    Ok(match family {
        OrderFamily::Normal => OrderRequest::Normal(decode_body(body)?),
        OrderFamily::Bracket => OrderRequest::bracket(decode_body(body)?),
        OrderFamily::Cover => OrderRequest::Cover(decode_body(body)?),
    })
}

// ---------------------------------------------------------------------------
// GET /v1/orders
// ---------------------------------------------------------------------------

pub(crate) async fn order_book(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<OrderBookQuery>, QueryRejection>,
) -> Response {
    let span = info_span!("request", request_id = %Uuid::new_v4(), op = "order_book");

    async move {
        let caller = match caller_from_headers(&headers) {
            Ok(c) => c,
            Err(e) => return render_error(e),
        };
        let Query(query) = match query {
            Ok(q) => q,
            Err(e) => {
                warn!(error = %e, "order book query rejected");
                return render_error(ApiError::bad_request(format!("invalid query: {e}")));
            }
        };

        match st.gateway.order_book(&caller, &query).await {
            Ok(rows) => render(ApiEnvelope::ok(rows)),
            Err(e) => render_error(e),
        }
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// GET /v1/positions
// ---------------------------------------------------------------------------

pub(crate) async fn position_book(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let span = info_span!("request", request_id = %Uuid::new_v4(), op = "position_book");

    async move {
        let caller = match caller_from_headers(&headers) {
            Ok(c) => c,
            Err(e) => return render_error(e),
        };

        match st.gateway.position_book(&caller).await {
            Ok(book) => render(ApiEnvelope::ok(book)),
            Err(e) => render_error(e),
        }
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// POST /v1/positions/convert
// ---------------------------------------------------------------------------

pub(crate) async fn convert_position(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = info_span!("request", request_id = %Uuid::new_v4(), op = "convert_position");

    async move {
        let caller = match caller_from_headers(&headers) {
            Ok(c) => c,
            Err(e) => return render_error(e),
        };
        let req: ConversionRequest = match decode_body(&body) {
            Ok(r) => r,
            Err(e) => return render_error(e),
        };

        match st.gateway.convert_position(&caller, req).await {
            Ok(message) => render(ApiEnvelope::ok(message)),
            Err(e) => render_error(e),
        }
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "request body rejected");
        ApiError::bad_request(format!("invalid request body: {e}"))
    })
}

fn render<T: Serialize>(env: ApiEnvelope<T>) -> Response {
    (StatusCode::OK, Json(env)).into_response()
}

/// Soft failures answer 200 with `status: false` and the detail as data;
/// everything else uses the error's own HTTP status.
fn render_error(e: ApiError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if e.is_soft() {
        let env = ApiEnvelope {
            status: false,
            data: Some(e.detail.clone()),
            message: None,
            errors: vec![e.to_detail()],
        };
        return (StatusCode::OK, Json(env)).into_response();
    }

    (status, Json(ApiEnvelope::<()>::failed(vec![e.to_detail()]))).into_response()
}
