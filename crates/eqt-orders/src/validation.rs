//! Order validation.
//!
//! Two layers:
//!
//! 1. [`validate_structure`]: shape checks every request must pass,
//!    modifications included.
//! 2. [`validate_order`]: exchange/business rules the vendor does not
//!    enforce itself, evaluated per family in a fixed order. The first
//!    violated rule is returned; rules are never aggregated.
//!
//! Modifications only get layer 1. The vendor re-checks modified orders
//! against the resting order, so business rules are not re-run here.

use std::fmt;

use eqt_schemas::{OrderParams, OrderType, Side, Validity};

use crate::error::ApiError;
use crate::types::OrderRequest;

/// Allowed after-market timing codes.
pub const OFF_MARKET_TIMING_CODES: [i32; 3] = [1, 2, 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    NonPositiveQuantity,
    InvalidExchangeToken,
    MissingExchange,
    DisclosedQtyOutOfRange,
    LimitPriceZero,
    TriggerLimitPriceZero,
    TriggerPriceZeroWithLimit,
    IocWithTrigger,
    BuyTriggerAboveLimit,
    SellTriggerBelowLimit,
    TriggerPriceZero,
    ProfitAndStoplossZero,
    ProfitValueZero,
    StoplossValueZero,
    OffMarketTimingInvalid,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::NonPositiveQuantity => "Quantity must be greater than zero",
            ValidationError::InvalidExchangeToken => "ExchangeToken must be greater than zero",
            ValidationError::MissingExchange => "Exchange cannot be empty",
            ValidationError::DisclosedQtyOutOfRange => {
                "DisclosedQty cannot be negative or greater than quantity"
            }
            ValidationError::LimitPriceZero => "Price cannot be zero with limit order",
            ValidationError::TriggerLimitPriceZero => {
                "Price cannot be zero with trigger limit order"
            }
            ValidationError::TriggerPriceZeroWithLimit => {
                "Trigger Price cannot be zero with limit order"
            }
            ValidationError::IocWithTrigger => "Validity cannot be IOC with Trigger order",
            ValidationError::BuyTriggerAboveLimit => {
                "Trigger Price cannot be greater than limit buy price"
            }
            ValidationError::SellTriggerBelowLimit => {
                "Trigger Price cannot be less than limit sell price"
            }
            ValidationError::TriggerPriceZero => "Trigger Price cannot be zero",
            ValidationError::ProfitAndStoplossZero => "ProfitValue, StoplossValue cannot be zero",
            ValidationError::ProfitValueZero => "ProfitValue cannot be zero",
            ValidationError::StoplossValueZero => "StoplossValue cannot be zero",
            ValidationError::OffMarketTimingInvalid => {
                "OffMktOrderTimeFlag possible allowed values are 1|2|3 in AMO"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Shape checks shared by every family.
pub fn validate_structure(p: &OrderParams) -> Result<(), ValidationError> {
    if p.quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    if p.exchange_token == 0 {
        return Err(ValidationError::InvalidExchangeToken);
    }
    if p.exchange.trim().is_empty() {
        return Err(ValidationError::MissingExchange);
    }
    if p.disclosed_qty < 0 || p.disclosed_qty > p.quantity {
        return Err(ValidationError::DisclosedQtyOutOfRange);
    }
    Ok(())
}

/// Full validation: structure first, then the family's business rules.
pub fn validate_order(req: &OrderRequest) -> Result<(), ValidationError> {
    validate_structure(req.params())?;

    match req {
        OrderRequest::Normal(p) => normal_rules(p),
        OrderRequest::Cover(p) => cover_rules(p),
        OrderRequest::Bracket {
            params,
            profit_value,
            stoploss_value,
        } => bracket_rules(params, *profit_value, *stoploss_value),
        OrderRequest::Modify { .. } => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Per-family rules
// ---------------------------------------------------------------------------

fn normal_rules(p: &OrderParams) -> Result<(), ValidationError> {
    match p.order_type {
        OrderType::Limit => limit_price(p)?,
        OrderType::StopLimit => {
            if p.price <= 0.0 {
                return Err(ValidationError::TriggerLimitPriceZero);
            }
            if p.trigger_price <= 0.0 {
                return Err(ValidationError::TriggerPriceZeroWithLimit);
            }
            no_ioc_on_trigger(p)?;
            match p.txn_type {
                Side::Buy if p.trigger_price > p.price => {
                    return Err(ValidationError::BuyTriggerAboveLimit)
                }
                Side::Sell if p.trigger_price < p.price => {
                    return Err(ValidationError::SellTriggerBelowLimit)
                }
                _ => {}
            }
        }
        OrderType::StopMarket => {
            if p.trigger_price <= 0.0 {
                return Err(ValidationError::TriggerPriceZeroWithLimit);
            }
            no_ioc_on_trigger(p)?;
        }
        OrderType::Market => {}
    }
    off_market_timing(p)
}

fn cover_rules(p: &OrderParams) -> Result<(), ValidationError> {
    limit_price(p)?;
    if p.trigger_price <= 0.0 {
        return Err(ValidationError::TriggerPriceZero);
    }
    off_market_timing(p)
}

fn bracket_rules(
    p: &OrderParams,
    profit_value: f64,
    stoploss_value: f64,
) -> Result<(), ValidationError> {
    limit_price(p)?;
    match (profit_value > 0.0, stoploss_value > 0.0) {
        (false, false) => return Err(ValidationError::ProfitAndStoplossZero),
        (false, true) => return Err(ValidationError::ProfitValueZero),
        (true, false) => return Err(ValidationError::StoplossValueZero),
        (true, true) => {}
    }
    off_market_timing(p)
}

// ---------------------------------------------------------------------------
// Shared primitives
// ---------------------------------------------------------------------------

fn limit_price(p: &OrderParams) -> Result<(), ValidationError> {
    if p.order_type == OrderType::Limit && p.price <= 0.0 {
        return Err(ValidationError::LimitPriceZero);
    }
    Ok(())
}

fn no_ioc_on_trigger(p: &OrderParams) -> Result<(), ValidationError> {
    if p.validity == Validity::Ioc {
        return Err(ValidationError::IocWithTrigger);
    }
    Ok(())
}

fn off_market_timing(p: &OrderParams) -> Result<(), ValidationError> {
    if p.off_mkt_flag && !OFF_MARKET_TIMING_CODES.contains(&p.off_mkt_order_time_flag) {
        return Err(ValidationError::OffMarketTimingInvalid);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
