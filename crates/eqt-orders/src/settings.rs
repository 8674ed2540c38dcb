//! Vendor connection settings, injected into [`crate::OrderGateway`] at
//! construction. Built from configuration by `eqt-config`.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::classify::ErrorClassifier;
use crate::types::OrderFamily;

/// Default short-class timeout: placement, modification, book queries.
pub const DEFAULT_SHORT_TIMEOUT: Duration = Duration::from_millis(700);
/// Default long-class timeout: conversion submission.
pub const DEFAULT_LONG_TIMEOUT: Duration = Duration::from_millis(1000);

pub const DEFAULT_SUCCESS_TOKEN: &str = "success";
pub const DEFAULT_OMS_ERROR_CODE: &str = "RS-0022";

/// Vendor endpoint paths, relative to the endpoint base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VendorPaths {
    pub order_entry: String,
    pub order_modify: String,
    pub bracket_entry: String,
    pub bracket_modify: String,
    pub cover_entry: String,
    pub cover_modify: String,
    pub order_book: String,
    pub position_book: String,
    pub position_convert: String,
}

impl Default for VendorPaths {
    fn default() -> Self {
        Self {
            order_entry: "/order/entry".to_string(),
            order_modify: "/order/modify".to_string(),
            bracket_entry: "/bo/entry".to_string(),
            bracket_modify: "/bo/modify".to_string(),
            cover_entry: "/co/entry".to_string(),
            cover_modify: "/co/modify".to_string(),
            order_book: "/order/book".to_string(),
            position_book: "/position/net".to_string(),
            position_convert: "/position/convert".to_string(),
        }
    }
}

impl VendorPaths {
    pub fn entry(&self, family: OrderFamily) -> &str {
        match family {
            OrderFamily::Normal => &self.order_entry,
            OrderFamily::Bracket => &self.bracket_entry,
            OrderFamily::Cover => &self.cover_entry,
        }
    }

    pub fn modify(&self, family: OrderFamily) -> &str {
        match family {
            OrderFamily::Normal => &self.order_modify,
            OrderFamily::Bracket => &self.bracket_modify,
            OrderFamily::Cover => &self.cover_modify,
        }
    }
}

/// Everything the gateway needs to reach and interpret the vendor.
///
/// `headers` holds resolved values, credentials included.
/// **Header values are redacted in `Debug` output.**
#[derive(Clone)]
pub struct VendorSettings {
    pub endpoint: String,
    pub source: String,
    pub success_token: String,
    pub market_type: String,
    pub user_type: String,
    pub headers: Vec<(String, String)>,
    pub short_timeout: Duration,
    pub long_timeout: Duration,
    pub paths: VendorPaths,
    pub classifier: ErrorClassifier,
}

impl std::fmt::Debug for VendorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("VendorSettings")
            .field("endpoint", &self.endpoint)
            .field("source", &self.source)
            .field("success_token", &self.success_token)
            .field("market_type", &self.market_type)
            .field("user_type", &self.user_type)
            .field("headers", &header_names)
            .field("short_timeout", &self.short_timeout)
            .field("long_timeout", &self.long_timeout)
            .field("paths", &self.paths)
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl VendorSettings {
    /// Settings with default paths, timeouts and tokens and an empty error
    /// table.
    pub fn new(endpoint: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            source: source.into(),
            success_token: DEFAULT_SUCCESS_TOKEN.to_string(),
            market_type: "NL".to_string(),
            user_type: "C".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            short_timeout: DEFAULT_SHORT_TIMEOUT,
            long_timeout: DEFAULT_LONG_TIMEOUT,
            paths: VendorPaths::default(),
            classifier: ErrorClassifier::new(BTreeMap::new(), DEFAULT_OMS_ERROR_CODE),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
