//! Typed view over the merged gateway config.
//!
//! Every field has a default so an empty document yields a usable local
//! setup; only `vendor.endpoint` is required.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use eqt_orders::{
    ErrorClassifier, VendorPaths, VendorSettings, DEFAULT_OMS_ERROR_CODE, DEFAULT_SUCCESS_TOKEN,
};
use serde::Deserialize;
use serde_json::Value;

use crate::secrets::ResolvedHeaders;

pub const DEFAULT_DAEMON_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub daemon: DaemonSection,
    pub vendor: VendorSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonSection {
    pub addr: String,
}

impl Default for DaemonSection {
    fn default() -> Self {
        Self {
            addr: DEFAULT_DAEMON_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VendorSection {
    pub endpoint: String,
    pub source: String,
    pub success_token: String,
    pub oms_error_code: String,
    pub market_type: String,
    pub user_type: String,
    pub timeouts_ms: TimeoutsMs,
    /// Static, non-secret headers.
    pub headers: BTreeMap<String, String>,
    /// Header name -> environment variable NAME holding its value.
    pub headers_env: BTreeMap<String, String>,
    /// Vendor error code -> 400 (client fault) or 500 (vendor fault).
    pub error_codes: BTreeMap<String, u16>,
    pub paths: PathsSection,
}

impl Default for VendorSection {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            source: "API".to_string(),
            success_token: DEFAULT_SUCCESS_TOKEN.to_string(),
            oms_error_code: DEFAULT_OMS_ERROR_CODE.to_string(),
            market_type: "NL".to_string(),
            user_type: "C".to_string(),
            timeouts_ms: TimeoutsMs::default(),
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            headers_env: BTreeMap::new(),
            error_codes: BTreeMap::new(),
            paths: PathsSection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeoutsMs {
    pub short: u64,
    pub long: u64,
}

impl Default for TimeoutsMs {
    fn default() -> Self {
        Self {
            short: 700,
            long: 1000,
        }
    }
}

/// Mirrors [`VendorPaths`]; missing entries keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSection {
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

impl Default for PathsSection {
    fn default() -> Self {
        let p = VendorPaths::default();
        Self {
            order_entry: p.order_entry,
            order_modify: p.order_modify,
            bracket_entry: p.bracket_entry,
            bracket_modify: p.bracket_modify,
            cover_entry: p.cover_entry,
            cover_modify: p.cover_modify,
            order_book: p.order_book,
            position_book: p.position_book,
            position_convert: p.position_convert,
        }
    }
}

impl From<PathsSection> for VendorPaths {
    fn from(p: PathsSection) -> Self {
        Self {
            order_entry: p.order_entry,
            order_modify: p.order_modify,
            bracket_entry: p.bracket_entry,
            bracket_modify: p.bracket_modify,
            cover_entry: p.cover_entry,
            cover_modify: p.cover_modify,
            order_book: p.order_book,
            position_book: p.position_book,
            position_convert: p.position_convert,
        }
    }
}

impl GatewayConfig {
    pub fn from_json(config_json: &Value) -> Result<Self> {
        let cfg: GatewayConfig = serde_json::from_value(config_json.clone())
            .context("CONFIG_INVALID gateway config does not match schema")?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<()> {
        let v = &self.vendor;
        if v.endpoint.trim().is_empty() {
            bail!("CONFIG_INVALID vendor.endpoint is required");
        }
        if v.timeouts_ms.short == 0 || v.timeouts_ms.long == 0 {
            bail!("CONFIG_INVALID vendor.timeouts_ms must be positive");
        }
        if let Some((code, status)) = v
            .error_codes
            .iter()
            .find(|(_, s)| **s != 400 && **s != 500)
        {
            bail!(
                "CONFIG_INVALID vendor.error_codes.{} = {}; expected 400 or 500",
                code,
                status
            );
        }
        Ok(())
    }

    /// Build gateway settings. `headers` must come from
    /// [`crate::resolve_vendor_headers`] on this same config.
    pub fn into_vendor_settings(self, headers: ResolvedHeaders) -> VendorSettings {
        let v = self.vendor;
        VendorSettings {
            endpoint: v.endpoint,
            source: v.source,
            success_token: v.success_token,
            market_type: v.market_type,
            user_type: v.user_type,
            headers: headers.into_pairs(),
            short_timeout: Duration::from_millis(v.timeouts_ms.short),
            long_timeout: Duration::from_millis(v.timeouts_ms.long),
            paths: v.paths.into(),
            classifier: ErrorClassifier::new(v.error_codes, v.oms_error_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_required() {
        let err = GatewayConfig::from_json(&serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("vendor.endpoint"));
    }

    #[test]
    fn error_code_status_must_be_400_or_500() {
        let v = serde_json::json!({
            "vendor": { "endpoint": "https://v.test", "error_codes": { "RS-1": 404 } }
        });
        let err = GatewayConfig::from_json(&v).unwrap_err();
        assert!(err.to_string().contains("RS-1"));
    }

    #[test]
    fn partial_paths_keep_defaults() {
        let v = serde_json::json!({
            "vendor": { "endpoint": "https://v.test", "paths": { "order_book": "/ob" } }
        });
        let cfg = GatewayConfig::from_json(&v).unwrap();
        assert_eq!(cfg.vendor.paths.order_book, "/ob");
        assert_eq!(cfg.vendor.paths.order_entry, "/order/entry");
    }
}
