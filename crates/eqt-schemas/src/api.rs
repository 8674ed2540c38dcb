//! Client-facing request and response contract.
//!
//! Inbound bodies are decoded straight into these types; the response
//! envelope is what every gateway route returns.

use serde::{Deserialize, Serialize};

use crate::codes::{OrderType, Product, Segment, Side, Validity};

// ---------------------------------------------------------------------------
// Inbound order bodies
// ---------------------------------------------------------------------------

/// Fields shared by every order family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderParams {
    pub txn_type: Side,
    pub exchange: String,
    pub segment: Segment,
    pub product: Product,
    /// Vendor instrument token.
    pub exchange_token: u64,
    pub quantity: i64,
    #[serde(default)]
    pub disclosed_qty: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub trigger_price: f64,
    pub order_type: OrderType,
    pub validity: Validity,
    /// After-market order.
    #[serde(default)]
    pub off_mkt_flag: bool,
    /// After-market timing code, `1..=3` when `off_mkt_flag` is set.
    #[serde(default)]
    pub off_mkt_order_time_flag: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketOrderBody {
    #[serde(flatten)]
    pub params: OrderParams,
    #[serde(default)]
    pub profit_value: f64,
    #[serde(default)]
    pub stoploss_value: f64,
}

/// Body of a modify request for any family. Carries the vendor's order
/// identifiers on top of the shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyOrderBody {
    #[serde(flatten)]
    pub params: OrderParams,
    pub order_no: String,
    #[serde(default)]
    pub group_id: i64,
    #[serde(default)]
    pub serial_no: i64,
    /// Leg number for multi-leg products (cover, bracket).
    #[serde(default)]
    pub leg_no: Option<i64>,
    /// Parent algo order number (bracket only).
    #[serde(default)]
    pub algo_order_no: Option<String>,
}

/// Request to move an open position from one product type to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub position_type: Side,
    pub exchange: String,
    /// Compared verbatim against the position row's security id.
    pub exchange_token: String,
    pub position_from: String,
    pub position_to: String,
    pub quantity: i64,
    /// Resolved from the matched position; never read from the caller.
    #[serde(skip_deserializing)]
    pub segment: String,
}

/// Order book query filters. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookQuery {
    #[serde(default)]
    pub search_txt: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub options_type: Option<String>,
    /// Section filter: `open` or `executed`.
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub detail: String,
}

/// `{ status, data, message?, errors }`: the shape of every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn failed(errors: Vec<ErrorDetail>) -> Self {
        Self {
            status: false,
            data: None,
            message: None,
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound data
// ---------------------------------------------------------------------------

/// Vendor order reference(s) returned on placement / modification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo_order_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// One normalized order book row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookRow {
    pub symbol: String,
    pub display_name: String,
    pub security_id: String,
    pub exchange: String,
    pub segment: String,
    pub opt_type: String,
    pub expiry_date: String,
    pub lot_size: String,

    pub quantity: String,
    pub disc_quantity: String,
    pub remaining_quantity: String,
    pub traded_qty: String,
    pub dq_qty_rem: String,
    pub rem_qty_tot_qty: String,

    pub price: String,
    pub trigger_price: String,
    pub traded_price: String,
    pub avg_traded_price: String,

    /// Client status (`Pending`, `Partially Executed`, `Executed`, ...).
    pub status: String,
    /// `Open` / `Executed`; absent for statuses outside the known table.
    pub section: Option<String>,
    pub error_code: String,
    pub order_no: String,
    pub exch_order_no: String,
    pub serial_no: String,

    pub order_date_time: String,
    pub exch_order_time: String,
    pub last_updated_time: String,
    pub good_till_days_date: String,

    pub txn_type: String,
    pub product: String,
    pub product_name: String,
    pub order_type: String,
    pub validity: String,
    pub participant_type: String,
    pub expiry_flag: String,

    /// `security_id + "_" + exchange`.
    pub stream_symbol: String,
}

/// One net position with computed profit/loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    pub symbol: String,
    pub display_name: String,
    pub security_id: String,
    pub exchange: String,
    pub segment: String,
    pub product: String,
    pub expiry_date: String,
    pub lot_size: String,

    /// Signed: positive long, negative short.
    pub net_qty: i64,
    pub buy_avg: f64,
    pub sell_avg: f64,
    pub net_avg: f64,
    pub last_traded_price: f64,
    pub realised_profit: f64,

    pub gross_qty: i64,
    pub gross_val: f64,
    pub tot_buy_qty: i64,
    pub tot_buy_val: f64,
    pub tot_sell_qty: i64,
    pub tot_sell_val: f64,
    pub tot_sell_val_day: f64,
    pub net_val: f64,

    pub unrealised_profit: f64,
    /// `unrealised_profit + realised_profit`.
    pub total_profit_loss: f64,
    pub stream_symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionBook {
    pub order_position: Vec<PositionRow>,
    /// Sum of every row's `total_profit_loss`.
    pub total_profit_loss: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_body_flattens_shared_fields() {
        let raw = r#"{
            "txn_type": "B", "exchange": "NSE", "segment": "E", "product": "B",
            "exchange_token": 1594, "quantity": 10, "price": 100.5,
            "order_type": "LMT", "validity": "DAY",
            "profit_value": 2.0, "stoploss_value": 1.0
        }"#;
        let body: BracketOrderBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.params.exchange_token, 1594);
        assert_eq!(body.params.disclosed_qty, 0);
        assert!(!body.params.off_mkt_flag);
        assert_eq!(body.profit_value, 2.0);
    }

    #[test]
    fn conversion_segment_is_never_read_from_caller() {
        let raw = r#"{
            "position_type": "B", "exchange": "NSE", "exchange_token": "1594",
            "position_from": "C", "position_to": "I", "quantity": 5, "segment": "D"
        }"#;
        let req: ConversionRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.segment, "");
    }

    #[test]
    fn envelope_omits_message_when_absent() {
        let v = serde_json::to_value(ApiEnvelope::ok(1)).unwrap();
        assert_eq!(v["status"], true);
        assert!(v.get("message").is_none());
        assert_eq!(v["errors"], serde_json::json!([]));

        let v = serde_json::to_value(ApiEnvelope::ok(1).with_message("done")).unwrap();
        assert_eq!(v["message"], "done");
    }
}
