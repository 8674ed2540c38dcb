//! eqt-vendor-rest
//!
//! HTTP implementation of [`VendorInvoker`] over one shared
//! `reqwest::Client`. The client is connection-pooled and safe to share
//! across requests; per-call timeouts come from the [`VendorCall`].
//!
//! No retries, no response interpretation: status and raw bytes are handed
//! back to the gateway for classification.

use eqt_orders::{HttpMethod, TransportError, VendorCall, VendorInvoker, VendorReply};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RestInvoker {
    http: reqwest::Client,
}

impl RestInvoker {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl VendorInvoker for RestInvoker {
    async fn invoke(&self, call: VendorCall) -> Result<VendorReply, TransportError> {
        let mut req = match call.method {
            HttpMethod::Get => self.http.get(&call.url),
            HttpMethod::Post => self.http.post(&call.url),
            HttpMethod::Put => self.http.put(&call.url),
        }
        .timeout(call.timeout);

        for (name, value) in &call.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if !call.body.is_empty() {
            req = req.body(call.body);
        }

        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(transport_error)?;
        debug!(url = %call.url, status, bytes = body.len(), "vendor response received");

        Ok(VendorReply {
            status,
            body: body.to_vec(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
