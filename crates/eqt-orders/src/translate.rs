//! Internal model ↔ vendor wire format.
//!
//! Request direction builds typed vendor bodies from validated requests.
//! Response direction decodes the vendor envelope. Everything here is pure.
//!
//! # Number formatting
//! | Kind     | Rule                                                   |
//! |----------|--------------------------------------------------------|
//! | integers | base-10, no padding                                    |
//! | prices   | shortest round-trip decimal, never scientific notation |
//! | booleans | `"true"` / `"false"`                                   |

use std::fmt;

use eqt_schemas::vendor::{
    BookQueryData, BracketOrderData, ConvertPositionData, CoverOrderData, ModifyOrderData,
    NormalOrderData, VendorEnvelope, VendorOrderAck, VendorRequest,
};
use eqt_schemas::{ConversionRequest, OrderAck, OrderParams, Product};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::types::{CallerIdentity, ModifyIds, OrderRequest};

/// Interop flag the vendor expects on position book queries.
pub const POSITION_INTEROP_FLAG: &str = "IP";

// ---------------------------------------------------------------------------
// Primitive encoders
// ---------------------------------------------------------------------------

/// `100.5 -> "100.5"`, `100.0 -> "100"`, `0.00001 -> "0.00001"`.
pub fn price_str(v: f64) -> String {
    format!("{v}")
}

pub fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn optional_trigger(p: &OrderParams) -> Option<String> {
    (p.trigger_price > 0.0).then(|| price_str(p.trigger_price))
}

fn encash_timing(p: &OrderParams) -> Option<i32> {
    (p.off_mkt_flag && p.off_mkt_order_time_flag > 0).then_some(p.off_mkt_order_time_flag)
}

fn envelope<D>(caller: &CallerIdentity, source: &str, data: D) -> VendorRequest<D> {
    VendorRequest {
        entity_id: caller.entity_id.clone(),
        source: source.to_string(),
        data,
    }
}

// ---------------------------------------------------------------------------
// Request direction
// ---------------------------------------------------------------------------

/// Vendor body for any order request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderPayload {
    Normal(VendorRequest<NormalOrderData>),
    Bracket(VendorRequest<BracketOrderData>),
    Cover(VendorRequest<CoverOrderData>),
    Modify(VendorRequest<ModifyOrderData>),
}

pub fn order_payload(req: &OrderRequest, caller: &CallerIdentity, source: &str) -> OrderPayload {
    match req {
        OrderRequest::Normal(p) => {
            OrderPayload::Normal(envelope(caller, source, normal_data(p, caller)))
        }
        OrderRequest::Bracket {
            params,
            profit_value,
            stoploss_value,
        } => OrderPayload::Bracket(envelope(
            caller,
            source,
            bracket_data(params, *profit_value, *stoploss_value, caller),
        )),
        OrderRequest::Cover(p) => {
            OrderPayload::Cover(envelope(caller, source, cover_data(p, caller)))
        }
        OrderRequest::Modify { params, ids, .. } => {
            OrderPayload::Modify(envelope(caller, source, modify_data(params, ids, caller)))
        }
    }
}

pub fn normal_data(p: &OrderParams, caller: &CallerIdentity) -> NormalOrderData {
    let qty = p.quantity.to_string();
    NormalOrderData {
        client_id: caller.client_id.clone(),
        user_id: caller.user_id.clone(),
        txn_type: p.txn_type.code().to_string(),
        exchange: p.exchange.clone(),
        segment: p.segment.code().to_string(),
        product: p.product.code().to_string(),
        exchange_token: p.exchange_token.to_string(),
        // The vendor's disclosed quantity mirrors total quantity; the
        // caller's own value only switches the field on.
        disclosed_qty: (p.disclosed_qty > 0).then(|| qty.clone()),
        qty,
        price: price_str(p.price),
        validity: p.validity.code().to_string(),
        order_type: p.order_type.code().to_string(),
        trigger_price: optional_trigger(p),
        off_mkt_flag: bool_str(p.off_mkt_flag).to_string(),
        encash_flag: encash_timing(p),
    }
}

pub fn bracket_data(
    p: &OrderParams,
    profit_value: f64,
    stoploss_value: f64,
    caller: &CallerIdentity,
) -> BracketOrderData {
    BracketOrderData {
        client_id: caller.client_id.clone(),
        txn_type: p.txn_type.code().to_string(),
        exchange: p.exchange.clone(),
        segment: p.segment.code().to_string(),
        product: p.product.code().to_string(),
        exchange_token: p.exchange_token.to_string(),
        quantity: p.quantity.to_string(),
        price: price_str(p.price),
        validity: p.validity.code().to_string(),
        order_type: p.order_type.code().to_string(),
        profit_value: price_str(profit_value),
        stoploss_value: price_str(stoploss_value),
        trigger_price: optional_trigger(p),
        off_mkt_flag: bool_str(p.off_mkt_flag).to_string(),
        encash_flag: encash_timing(p),
    }
}

pub fn cover_data(p: &OrderParams, caller: &CallerIdentity) -> CoverOrderData {
    CoverOrderData {
        client_id: caller.client_id.clone(),
        txn_type: p.txn_type.code().to_string(),
        exchange: p.exchange.clone(),
        segment: p.segment.code().to_string(),
        product: p.product.code().to_string(),
        exchange_token: p.exchange_token.to_string(),
        quantity: p.quantity.to_string(),
        price: price_str(p.price),
        validity: p.validity.code().to_string(),
        order_type: p.order_type.code().to_string(),
        trigger_price: price_str(p.trigger_price),
        off_mkt_flag: bool_str(p.off_mkt_flag).to_string(),
        encash_flag: encash_timing(p),
    }
}

/// Modify body. Disclosed quantity and trigger price are always sent; leg
/// and algo identifiers only for the multi-leg products that own them.
pub fn modify_data(p: &OrderParams, ids: &ModifyIds, caller: &CallerIdentity) -> ModifyOrderData {
    let qty = p.quantity.to_string();
    let multi_leg = matches!(p.product, Product::Cover | Product::Bracket);
    ModifyOrderData {
        client_id: caller.client_id.clone(),
        user_id: caller.user_id.clone(),
        txn_type: p.txn_type.code().to_string(),
        exchange: p.exchange.clone(),
        segment: p.segment.code().to_string(),
        product: p.product.code().to_string(),
        exchange_token: p.exchange_token.to_string(),
        disclosed_qty: qty.clone(),
        qty,
        price: price_str(p.price),
        validity: p.validity.code().to_string(),
        order_type: p.order_type.code().to_string(),
        trigger_price: price_str(p.trigger_price),
        off_mkt_flag: bool_str(p.off_mkt_flag).to_string(),
        order_no: ids.order_no.clone(),
        group_id: ids.group_id.to_string(),
        serial_no: ids.serial_no.to_string(),
        leg_no: ids
            .leg_no
            .filter(|_| multi_leg)
            .map(|leg| leg.to_string()),
        algo_order_no: ids
            .algo_order_no
            .clone()
            .filter(|_| p.product == Product::Bracket),
    }
}

pub fn order_book_query(caller: &CallerIdentity, source: &str) -> VendorRequest<BookQueryData> {
    envelope(
        caller,
        source,
        BookQueryData {
            client_id: caller.client_id.clone(),
            user_id: caller.user_id.clone(),
            interop_flag: None,
        },
    )
}

pub fn position_book_query(caller: &CallerIdentity, source: &str) -> VendorRequest<BookQueryData> {
    envelope(
        caller,
        source,
        BookQueryData {
            client_id: caller.client_id.clone(),
            user_id: caller.user_id.clone(),
            interop_flag: Some(POSITION_INTEROP_FLAG.to_string()),
        },
    )
}

/// Conversion body. `req.segment` must already be resolved by the matcher.
pub fn conversion_request(
    req: &ConversionRequest,
    caller: &CallerIdentity,
    source: &str,
    mkt_type: &str,
    user_type: &str,
) -> VendorRequest<ConvertPositionData> {
    envelope(
        caller,
        source,
        ConvertPositionData {
            client_id: caller.client_id.clone(),
            user_id: caller.user_id.clone(),
            exchange: req.exchange.clone(),
            security_id: req.exchange_token.clone(),
            segment: req.segment.clone(),
            quantity: req.quantity,
            mkt_type: mkt_type.to_string(),
            user_type: user_type.to_string(),
            txn_type: req.position_type.code().to_string(),
            product_from: req.position_from.clone(),
            product_to: req.position_to.clone(),
        },
    )
}

// ---------------------------------------------------------------------------
// Response direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Body is not a vendor envelope.
    Envelope(String),
    /// Envelope decoded but `data` has an unexpected shape.
    Data(String),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Envelope(msg) => write!(f, "vendor envelope decode failed: {msg}"),
            TranslateError::Data(msg) => write!(f, "vendor data decode failed: {msg}"),
        }
    }
}

impl std::error::Error for TranslateError {}

pub fn decode_envelope(body: &[u8]) -> Result<VendorEnvelope, TranslateError> {
    serde_json::from_slice(body).map_err(|e| TranslateError::Envelope(e.to_string()))
}

/// Decode the `data` member of a successful envelope. Missing data decodes
/// as JSON `null`; decode into `Option<_>` where absence is legal.
pub fn decode_data<T: DeserializeOwned>(data: Option<Value>) -> Result<T, TranslateError> {
    let v = match data {
        Some(v) => v,
        None => Value::Null,
    };
    serde_json::from_value(v).map_err(|e| TranslateError::Data(e.to_string()))
}

pub fn order_ack(raw: VendorOrderAck) -> OrderAck {
    OrderAck {
        order_no: raw.order_no,
        algo_order_no: raw.algo_order_no,
        group_id: raw.group_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use eqt_schemas::{OrderType, Segment, Side, Validity};

    fn caller() -> CallerIdentity {
        CallerIdentity::new("U1001").with_client_id("C1001")
    }

    fn params() -> OrderParams {
        OrderParams {
            txn_type: Side::Sell,
            exchange: "NSE".to_string(),
            segment: Segment::Equity,
            product: Product::Intraday,
            exchange_token: 1594,
            quantity: 25,
            disclosed_qty: 0,
            price: 100.5,
            trigger_price: 0.0,
            order_type: OrderType::Limit,
            validity: Validity::Day,
            off_mkt_flag: false,
            off_mkt_order_time_flag: 0,
        }
    }

    #[test]
    fn prices_use_shortest_decimal() {
        assert_eq!(price_str(100.5), "100.5");
        assert_eq!(price_str(100.0), "100");
        assert_eq!(price_str(0.05), "0.05");
        assert_eq!(price_str(0.000001), "0.000001");
        assert_eq!(price_str(12345678.25), "12345678.25");
    }

    #[test]
    fn normal_body_carries_caller_and_codes() {
        let body = match order_payload(&OrderRequest::Normal(params()), &caller(), "API") {
            OrderPayload::Normal(b) => b,
            other => panic!("unexpected payload {other:?}"),
        };
        assert_eq!(body.entity_id, "U1001");
        assert_eq!(body.source, "API");
        assert_eq!(body.data.client_id, "C1001");
        assert_eq!(body.data.user_id, "U1001");
        assert_eq!(body.data.txn_type, "S");
        assert_eq!(body.data.product, "I");
        assert_eq!(body.data.qty, "25");
        assert_eq!(body.data.price, "100.5");
        assert_eq!(body.data.off_mkt_flag, "false");
        assert!(body.data.disclosed_qty.is_none());
        assert!(body.data.trigger_price.is_none());
        assert!(body.data.encash_flag.is_none());
    }

    #[test]
    fn disclosed_quantity_mirrors_total_quantity() {
        let mut p = params();
        p.disclosed_qty = 5;
        let data = normal_data(&p, &caller());
        assert_eq!(data.disclosed_qty.as_deref(), Some("25"));
    }

    #[test]
    fn trigger_and_encash_only_when_present() {
        let mut p = params();
        p.trigger_price = 99.0;
        p.off_mkt_flag = true;
        p.off_mkt_order_time_flag = 2;
        let data = normal_data(&p, &caller());
        assert_eq!(data.trigger_price.as_deref(), Some("99"));
        assert_eq!(data.off_mkt_flag, "true");
        assert_eq!(data.encash_flag, Some(2));

        p.off_mkt_flag = false;
        assert_eq!(normal_data(&p, &caller()).encash_flag, None);
    }

    #[test]
    fn bracket_and_cover_carry_encash_for_after_market() {
        let mut p = params();
        p.trigger_price = 99.0;
        p.off_mkt_flag = true;
        p.off_mkt_order_time_flag = 3;

        let bracket = bracket_data(&p, 5.0, 2.5, &caller());
        assert_eq!(bracket.encash_flag, Some(3));
        assert_eq!(bracket.off_mkt_flag, "true");
        let v = serde_json::to_value(&bracket).unwrap();
        assert_eq!(v["encash_flag"], 3);

        let cover = cover_data(&p, &caller());
        assert_eq!(cover.encash_flag, Some(3));
        let v = serde_json::to_value(&cover).unwrap();
        assert_eq!(v["encash_flag"], 3);

        p.off_mkt_flag = false;
        let v = serde_json::to_value(cover_data(&p, &caller())).unwrap();
        assert!(v.get("encash_flag").is_none());
        assert_eq!(bracket_data(&p, 5.0, 2.5, &caller()).encash_flag, None);
    }

    #[test]
    fn translation_preserves_quantity_price_and_token() {
        for (qty, px, token) in [(1_i64, 0.05, 1_u64), (250, 1234.75, 1594), (10_000, 99.0, 500_112)] {
            let mut p = params();
            p.quantity = qty;
            p.price = px;
            p.exchange_token = token;
            let v = serde_json::to_value(order_payload(&OrderRequest::Normal(p), &caller(), "API"))
                .unwrap();
            assert_eq!(v["data"]["qty"].as_str().unwrap().parse::<i64>().unwrap(), qty);
            assert_eq!(v["data"]["price"].as_str().unwrap().parse::<f64>().unwrap(), px);
            assert_eq!(
                v["data"]["exchange_token"].as_str().unwrap().parse::<u64>().unwrap(),
                token
            );
        }
    }

    #[test]
    fn cover_always_sends_trigger_price() {
        let mut p = params();
        p.product = Product::Cover;
        p.trigger_price = 101.25;
        let data = cover_data(&p, &caller());
        assert_eq!(data.trigger_price, "101.25");
        assert_eq!(data.quantity, "25");
    }

    #[test]
    fn bracket_carries_targets() {
        let mut p = params();
        p.product = Product::Bracket;
        let data = bracket_data(&p, 2.5, 1.0, &caller());
        assert_eq!(data.profit_value, "2.5");
        assert_eq!(data.stoploss_value, "1");
        assert_eq!(data.client_id, "C1001");
    }

    #[test]
    fn modify_leg_and_algo_follow_product() {
        let ids = ModifyIds {
            order_no: "1001".to_string(),
            group_id: 7,
            serial_no: 3,
            leg_no: Some(2),
            algo_order_no: Some("A-9".to_string()),
        };

        let normal = modify_data(&params(), &ids, &caller());
        assert_eq!(normal.disclosed_qty, "25");
        assert_eq!(normal.trigger_price, "0");
        assert_eq!(normal.group_id, "7");
        assert_eq!(normal.serial_no, "3");
        assert!(normal.leg_no.is_none());
        assert!(normal.algo_order_no.is_none());

        let mut p = params();
        p.product = Product::Cover;
        let cover = modify_data(&p, &ids, &caller());
        assert_eq!(cover.leg_no.as_deref(), Some("2"));
        assert!(cover.algo_order_no.is_none());

        p.product = Product::Bracket;
        let bracket = modify_data(&p, &ids, &caller());
        assert_eq!(bracket.leg_no.as_deref(), Some("2"));
        assert_eq!(bracket.algo_order_no.as_deref(), Some("A-9"));
    }

    #[test]
    fn book_queries_differ_only_by_interop_flag() {
        let ob = serde_json::to_value(order_book_query(&caller(), "API")).unwrap();
        let pb = serde_json::to_value(position_book_query(&caller(), "API")).unwrap();
        assert!(ob["data"].get("interop_flag").is_none());
        assert_eq!(pb["data"]["interop_flag"], "IP");
        assert_eq!(ob["data"]["client_id"], pb["data"]["client_id"]);
    }

    #[test]
    fn conversion_body_uses_resolved_segment() {
        let req = ConversionRequest {
            position_type: Side::Buy,
            exchange: "NSE".to_string(),
            exchange_token: "1594".to_string(),
            position_from: "C".to_string(),
            position_to: "I".to_string(),
            quantity: 50,
            segment: "D".to_string(),
        };
        let body = conversion_request(&req, &caller(), "API", "NL", "C");
        assert_eq!(body.data.segment, "D");
        assert_eq!(body.data.security_id, "1594");
        assert_eq!(body.data.txn_type, "B");
        assert_eq!(body.data.mkt_type, "NL");
        assert_eq!(body.data.quantity, 50);
    }

    #[test]
    fn decode_rejects_non_envelopes() {
        assert!(matches!(
            decode_envelope(b"<html>gateway timeout</html>"),
            Err(TranslateError::Envelope(_))
        ));
        let env = decode_envelope(br#"{"status":"success","data":{"order_no":123}}"#).unwrap();
        let ack: VendorOrderAck = decode_data(env.data).unwrap();
        assert_eq!(order_ack(ack).order_no, "123");
    }

    #[test]
    fn decode_data_treats_missing_as_null() {
        assert!(decode_data::<Vec<Value>>(None).is_err());
        let rows: Option<Vec<Value>> = decode_data(None).unwrap();
        assert!(rows.is_none());
        assert!(decode_data::<Vec<Value>>(Some(Value::String("x".into()))).is_err());
    }
}
