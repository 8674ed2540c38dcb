//! Short code sets shared by the client contract and the vendor wire format.
//!
//! Both sides speak the same single-letter / mnemonic codes, so each enum
//! serializes to exactly the vendor code. Unknown codes fail deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "B", alias = "BUY")]
    Buy,
    #[serde(rename = "S", alias = "SELL")]
    Sell,
}

impl Side {
    pub fn code(&self) -> &'static str {
        match self {
            Side::Buy => "B",
            Side::Sell => "S",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Exchange market segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "E")]
    Equity,
    #[serde(rename = "D")]
    Derivative,
    #[serde(rename = "C")]
    Currency,
    #[serde(rename = "M")]
    Commodity,
}

impl Segment {
    pub fn code(&self) -> &'static str {
        match self {
            Segment::Equity => "E",
            Segment::Derivative => "D",
            Segment::Currency => "C",
            Segment::Commodity => "M",
        }
    }
}

/// Product type an order or position is held under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Product {
    /// Cash / delivery.
    #[serde(rename = "C")]
    Cash,
    #[serde(rename = "M")]
    Margin,
    #[serde(rename = "I")]
    Intraday,
    /// Margin trading facility.
    #[serde(rename = "F")]
    Mtf,
    #[serde(rename = "V")]
    Cover,
    #[serde(rename = "B")]
    Bracket,
}

impl Product {
    pub fn code(&self) -> &'static str {
        match self {
            Product::Cash => "C",
            Product::Margin => "M",
            Product::Intraday => "I",
            Product::Mtf => "F",
            Product::Cover => "V",
            Product::Bracket => "B",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "MKT")]
    Market,
    #[serde(rename = "LMT")]
    Limit,
    /// Stop-loss limit.
    #[serde(rename = "SL")]
    StopLimit,
    /// Stop-loss market.
    #[serde(rename = "SLM")]
    StopMarket,
}

impl OrderType {
    pub fn code(&self) -> &'static str {
        match self {
            OrderType::Market => "MKT",
            OrderType::Limit => "LMT",
            OrderType::StopLimit => "SL",
            OrderType::StopMarket => "SLM",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    #[serde(rename = "DAY")]
    Day,
    #[serde(rename = "IOC")]
    Ioc,
}

impl Validity {
    pub fn code(&self) -> &'static str {
        match self {
            Validity::Day => "DAY",
            Validity::Ioc => "IOC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_accepts_long_aliases() {
        let buy: Side = serde_json::from_str("\"BUY\"").unwrap();
        let sell: Side = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(buy, Side::Buy);
        assert_eq!(sell, Side::Sell);
        assert_eq!(serde_json::to_string(&buy).unwrap(), "\"B\"");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(serde_json::from_str::<Side>("\"D\"").is_err());
        assert!(serde_json::from_str::<Segment>("\"A\"").is_err());
        assert!(serde_json::from_str::<Product>("\"X\"").is_err());
        assert!(serde_json::from_str::<OrderType>("\"STOP\"").is_err());
        assert!(serde_json::from_str::<Validity>("\"GTC\"").is_err());
    }

    #[test]
    fn code_matches_serialized_form() {
        for p in [
            Product::Cash,
            Product::Margin,
            Product::Intraday,
            Product::Mtf,
            Product::Cover,
            Product::Bracket,
        ] {
            let wire = serde_json::to_string(&p).unwrap();
            assert_eq!(wire, format!("\"{}\"", p.code()));
        }
    }
}
