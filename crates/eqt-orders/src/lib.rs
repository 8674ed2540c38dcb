//! eqt-orders
//!
//! Order-management core in front of the brokerage vendor:
//! - `validation`: exchange/business rules per order family
//! - `translate`: internal model ↔ vendor wire format
//! - `classify`: vendor failures → client error taxonomy
//! - `order_book` / `positions` / `conversion`: response normalization,
//!   P&L, and conversion eligibility
//! - `gateway`: the orchestrator, and the only code that talks to a
//!   [`VendorInvoker`]
//!
//! Everything except the gateway is pure and synchronous.

pub mod classify;
pub mod conversion;
mod error;
mod gateway;
mod invoker;
pub mod order_book;
pub mod positions;
mod settings;
pub mod translate;
mod types;
pub mod validation;

pub use classify::{ErrorClassifier, VendorFailure};
pub use error::{ApiError, ErrorKind};
pub use gateway::{OrderGateway, MODIFY_SUCCESS_MESSAGE};
pub use invoker::{HttpMethod, TransportError, VendorCall, VendorInvoker, VendorReply};
pub use settings::{
    VendorPaths, VendorSettings, DEFAULT_LONG_TIMEOUT, DEFAULT_OMS_ERROR_CODE,
    DEFAULT_SHORT_TIMEOUT, DEFAULT_SUCCESS_TOKEN,
};
pub use types::{CallerIdentity, ModifyIds, OrderFamily, OrderRequest};
pub use validation::ValidationError;
