//! Vendor invocation boundary.
//!
//! [`VendorInvoker`] is the single raw-HTTP primitive the gateway needs:
//! one request in, status + bytes (or a transport error) out. The HTTP
//! implementation lives in `eqt-vendor-rest`; tests use in-memory stubs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

/// One outbound vendor request.
#[derive(Clone, Debug, PartialEq)]
pub struct VendorCall {
    pub method: HttpMethod,
    pub url: String,
    /// JSON-encoded body.
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// The vendor's answer, undecoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VendorReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// No response was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    Timeout,
    Connect(String),
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "vendor call timed out"),
            TransportError::Connect(msg) => write!(f, "vendor connect failed: {msg}"),
            TransportError::Other(msg) => write!(f, "vendor transport error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Raw vendor invocation. Implementations must apply `call.timeout` and must
/// not retry.
#[async_trait::async_trait]
pub trait VendorInvoker: Send + Sync {
    async fn invoke(&self, call: VendorCall) -> Result<VendorReply, TransportError>;
}

#[async_trait::async_trait]
impl<T: VendorInvoker + ?Sized> VendorInvoker for Arc<T> {
    async fn invoke(&self, call: VendorCall) -> Result<VendorReply, TransportError> {
        (**self).invoke(call).await
    }
}
