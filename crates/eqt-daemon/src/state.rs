//! Shared runtime state for eqt-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. Nothing here is
//! mutable: the gateway is configured once at startup.

use std::sync::Arc;

use eqt_orders::{OrderGateway, VendorInvoker};
use serde::Serialize;

/// Gateway over a type-erased invoker so tests can swap in stubs.
pub type SharedGateway = OrderGateway<Arc<dyn VendorInvoker>>;

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            service: "eqt-daemon",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub struct AppState {
    pub build: BuildInfo,
    pub gateway: SharedGateway,
}

impl AppState {
    pub fn new(gateway: SharedGateway) -> Self {
        Self {
            build: BuildInfo::default(),
            gateway,
        }
    }
}
