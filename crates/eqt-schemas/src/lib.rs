//! eqt-schemas
//!
//! Serde shapes shared across the gateway: the exchange/order code sets,
//! the client-facing request/response contract (`api`) and the vendor wire
//! format (`vendor`). No business logic lives here.

pub mod api;
pub mod codes;
pub mod lenient;
pub mod vendor;

pub use api::*;
pub use codes::*;
