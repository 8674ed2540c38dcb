//! Vendor wire format.
//!
//! Every request is `{ entity_id, source, data }`. Numeric fields travel as
//! strings except where the vendor documents integers. Every response is a
//! [`VendorEnvelope`]; rows are decoded with the [`crate::lenient`] helpers
//! because the vendor mixes numbers and numeric strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRequest<D> {
    pub entity_id: String,
    pub source: String,
    pub data: D,
}

/// Normal order placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalOrderData {
    pub client_id: String,
    pub user_id: String,
    pub txn_type: String,
    pub exchange: String,
    pub segment: String,
    pub product: String,
    pub exchange_token: String,
    pub qty: String,
    pub price: String,
    pub validity: String,
    pub order_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<String>,
    pub off_mkt_flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encash_flag: Option<i32>,
}

/// Bracket order placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketOrderData {
    pub client_id: String,
    pub txn_type: String,
    pub exchange: String,
    pub segment: String,
    pub product: String,
    pub exchange_token: String,
    pub quantity: String,
    pub price: String,
    pub validity: String,
    pub order_type: String,
    pub profit_value: String,
    pub stoploss_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<String>,
    pub off_mkt_flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encash_flag: Option<i32>,
}

/// Cover order placement. Trigger price is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverOrderData {
    pub client_id: String,
    pub txn_type: String,
    pub exchange: String,
    pub segment: String,
    pub product: String,
    pub exchange_token: String,
    pub quantity: String,
    pub price: String,
    pub validity: String,
    pub order_type: String,
    pub trigger_price: String,
    pub off_mkt_flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encash_flag: Option<i32>,
}

/// Modification of any order family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifyOrderData {
    pub client_id: String,
    pub user_id: String,
    pub txn_type: String,
    pub exchange: String,
    pub segment: String,
    pub product: String,
    pub exchange_token: String,
    pub qty: String,
    pub price: String,
    pub validity: String,
    pub order_type: String,
    pub disclosed_qty: String,
    pub trigger_price: String,
    pub off_mkt_flag: String,
    pub order_no: String,
    pub group_id: String,
    pub serial_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo_order_no: Option<String>,
}

/// Order book / position book query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookQueryData {
    pub client_id: String,
    pub user_id: String,
    /// `"IP"` on position book queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interop_flag: Option<String>,
}

/// Product conversion of an open position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertPositionData {
    pub client_id: String,
    pub user_id: String,
    pub exchange: String,
    pub security_id: String,
    pub segment: String,
    pub quantity: i64,
    pub mkt_type: String,
    pub user_type: String,
    pub txn_type: String,
    pub product_from: String,
    pub product_to: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Common response wrapper. `status` equal to the configured success token
/// is the only success signal; HTTP 200 alone is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorEnvelope<T = Value> {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(
        default,
        alias = "errorCode",
        alias = "errCode",
        deserialize_with = "lenient::string"
    )]
    pub error_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// Data payload of a successful placement / modification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorOrderAck {
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_no: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub algo_order_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub group_id: Option<String>,
}

/// Raw order book row, exactly as the vendor reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorOrderRow {
    #[serde(default, deserialize_with = "lenient::string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub security_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exchange: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub segment: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub opt_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub expiry_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lot_size: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub disc_quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub remaining_quantity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub traded_qty: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dq_qty_rem: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub rem_qty_tot_qty: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub trigger_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub traded_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub avg_traded_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_no: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exch_order_no: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub serial_no: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_date_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exch_order_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_updated_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub good_till_days_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub txn_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub validity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub participant_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub expiry_flag: String,
}

/// Raw net position row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorPositionRow {
    #[serde(default, deserialize_with = "lenient::string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub security_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exchange: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub segment: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub expiry_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lot_size: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub net_qty: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub buy_avg: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sell_avg: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub net_avg: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub last_traded_price: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub realised_profit: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub gross_qty: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub gross_val: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub tot_buy_qty: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tot_buy_val: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub tot_sell_qty: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tot_sell_val: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tot_sell_val_day: f64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub net_val: f64,
}
