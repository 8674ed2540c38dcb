//! Response types specific to the daemon.
//!
//! The order/position contract itself lives in `eqt-schemas`; these aliases
//! name the envelope each route returns.

use eqt_schemas::{ApiEnvelope, OrderAck, OrderBookRow, PositionBook};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
}

// ---------------------------------------------------------------------------
// Route envelopes
// ---------------------------------------------------------------------------

/// `POST|PUT /v1/orders/{normal,bracket,cover}`
pub type OrderResponse = ApiEnvelope<OrderAck>;
/// `GET /v1/orders`
pub type OrderBookResponse = ApiEnvelope<Vec<OrderBookRow>>;
/// `GET /v1/positions`
pub type PositionBookResponse = ApiEnvelope<PositionBook>;
/// `POST /v1/positions/convert`. Data is the vendor's message, on success
/// and on a soft OMS rejection alike.
pub type ConversionResponse = ApiEnvelope<String>;
