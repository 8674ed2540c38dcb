//! Vendor header resolution.
//!
//! # Contract
//! - Config YAML stores credentials only as **env var NAMES** under
//!   `vendor.headers_env` (header name -> env var name).
//! - The daemon calls [`resolve_vendor_headers`] once at startup and hands
//!   the result to [`crate::GatewayConfig::into_vendor_settings`].
//! - `Debug` on [`ResolvedHeaders`] **redacts** values.
//! - Error messages reference the env var **NAME**, never the value.

use anyhow::{bail, Result};

use crate::gateway::GatewayConfig;

/// Final vendor header set: static headers plus env-resolved ones.
/// **Values are redacted in `Debug` output.**
#[derive(Clone, Default)]
pub struct ResolvedHeaders {
    pairs: Vec<(String, String)>,
}

impl std::fmt::Debug for ResolvedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for (k, _) in &self.pairs {
            m.entry(k, &"<REDACTED>");
        }
        m.finish()
    }
}

impl ResolvedHeaders {
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// Resolve from the process environment.
///
/// # Errors
/// Fails closed with `SECRETS_MISSING` naming the first unset or blank
/// variable.
pub fn resolve_vendor_headers(cfg: &GatewayConfig) -> Result<ResolvedHeaders> {
    resolve_vendor_headers_with(cfg, resolve_env)
}

/// Same as [`resolve_vendor_headers`] with an injectable lookup.
pub fn resolve_vendor_headers_with<F>(cfg: &GatewayConfig, lookup: F) -> Result<ResolvedHeaders>
where
    F: Fn(&str) -> Option<String>,
{
    let vendor = &cfg.vendor;
    let mut pairs: Vec<(String, String)> = vendor
        .headers
        .iter()
        .filter(|(name, _)| !vendor.headers_env.contains_key(*name))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    for (header, var_name) in &vendor.headers_env {
        let var_name = var_name.trim();
        if var_name.is_empty() {
            bail!(
                "SECRETS_MISSING: header '{}' has no env var name configured",
                header
            );
        }
        match lookup(var_name).filter(|v| !v.trim().is_empty()) {
            Some(value) => pairs.push((header.clone(), value)),
            None => bail!(
                "SECRETS_MISSING: header '{}' requires env var '{}' which is not set",
                header,
                var_name
            ),
        }
    }

    Ok(ResolvedHeaders { pairs })
}

/// Returns `None` if the variable is unset or blank.
fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn cfg_with_env(headers_env: &[(&str, &str)]) -> GatewayConfig {
        let mut cfg = GatewayConfig::default();
        cfg.vendor.endpoint = "https://v.test".to_string();
        cfg.vendor.headers_env = headers_env
            .iter()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        cfg
    }

    #[test]
    fn env_header_overrides_static_header_of_same_name() {
        let mut cfg = cfg_with_env(&[("x-api-key", "EQT_KEY")]);
        cfg.vendor
            .headers
            .insert("x-api-key".to_string(), "placeholder".to_string());

        let h = resolve_vendor_headers_with(&cfg, |_| Some("k-1".to_string())).unwrap();
        let pairs = h.into_pairs();
        let keys: Vec<_> = pairs.iter().filter(|(k, _)| k == "x-api-key").collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].1, "k-1");
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let cfg = cfg_with_env(&[("x-api-key", "EQT_KEY")]);
        let err = resolve_vendor_headers_with(&cfg, |_| Some("   ".to_string())).unwrap_err();
        assert!(err.to_string().contains("EQT_KEY"));
    }
}
