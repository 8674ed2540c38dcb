//! Order Gateway: the only path from a client request to the vendor.
//!
//! Each operation runs validation → translation → one vendor call →
//! classification → normalization. Conversion makes two sequential calls
//! (position book, then conversion). Nothing is retried.
//!
//! The gateway holds no per-request state; share one instance behind an
//! `Arc` across all requests.

use std::time::Instant;

use eqt_schemas::vendor::{VendorEnvelope, VendorOrderAck, VendorOrderRow, VendorPositionRow};
use eqt_schemas::{ConversionRequest, OrderAck, OrderBookQuery, OrderBookRow, PositionBook};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::classify::VendorFailure;
use crate::conversion::match_position;
use crate::error::{ApiError, ErrorKind};
use crate::invoker::{HttpMethod, VendorCall, VendorInvoker};
use crate::order_book::build_order_book;
use crate::positions::build_position_book;
use crate::settings::VendorSettings;
use crate::translate::{self, decode_data, decode_envelope};
use crate::types::{CallerIdentity, OrderRequest};
use crate::validation::validate_order;

/// Message returned alongside a successful modification.
pub const MODIFY_SUCCESS_MESSAGE: &str = "order modified successfully";

/// Timeout class of a vendor call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimeoutClass {
    Short,
    Long,
}

pub struct OrderGateway<V: VendorInvoker> {
    invoker: V,
    settings: VendorSettings,
}

impl<V: VendorInvoker> OrderGateway<V> {
    pub fn new(invoker: V, settings: VendorSettings) -> Self {
        Self { invoker, settings }
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// Place or modify an order of any family.
    pub async fn submit_order(
        &self,
        caller: &CallerIdentity,
        req: &OrderRequest,
    ) -> Result<OrderAck, ApiError> {
        validate_order(req).map_err(|e| {
            warn!(family = %req.family(), modify = req.is_modify(), reason = %e, "order rejected by validation");
            ApiError::from(e)
        })?;

        let family = req.family();
        let (op, path) = if req.is_modify() {
            ("modify_order", self.settings.paths.modify(family))
        } else {
            ("place_order", self.settings.paths.entry(family))
        };

        let body = translate::order_payload(req, caller, &self.settings.source);
        let env = self.call(op, path, &body, TimeoutClass::Short).await?;

        // Some modify endpoints answer with no data at all.
        let ack: Option<VendorOrderAck> = decode_data(env.data).map_err(|e| {
            error!(op, error = %e, "vendor order ack decode failed");
            self.settings
                .classifier
                .classify(VendorFailure::Undecodable(&e))
        })?;

        let ack = translate::order_ack(ack.unwrap_or_default());
        info!(op, %family, order_no = %ack.order_no, "order accepted by vendor");
        Ok(ack)
    }

    // -----------------------------------------------------------------------
    // Books
    // -----------------------------------------------------------------------

    pub async fn order_book(
        &self,
        caller: &CallerIdentity,
        query: &OrderBookQuery,
    ) -> Result<Vec<OrderBookRow>, ApiError> {
        let body = translate::order_book_query(caller, &self.settings.source);
        let env = self
            .call(
                "order_book",
                &self.settings.paths.order_book,
                &body,
                TimeoutClass::Short,
            )
            .await?;

        let rows: Option<Vec<VendorOrderRow>> = self.decode("order_book", env.data)?;
        build_order_book(rows.unwrap_or_default(), query).map_err(|e| {
            warn!(user_id = %caller.user_id, detail = %e.detail, "order book empty after filtering");
            e
        })
    }

    pub async fn position_book(&self, caller: &CallerIdentity) -> Result<PositionBook, ApiError> {
        let rows = self.fetch_positions(caller).await?;
        build_position_book(rows).map_err(|e| {
            warn!(user_id = %caller.user_id, "position book empty");
            e
        })
    }

    // -----------------------------------------------------------------------
    // Conversion
    // -----------------------------------------------------------------------

    /// Convert an open position's product type.
    ///
    /// Returns the vendor's message on success. A reserved OMS rejection is
    /// returned as a soft `VendorOMSError` (see [`ApiError::is_soft`]).
    pub async fn convert_position(
        &self,
        caller: &CallerIdentity,
        mut req: ConversionRequest,
    ) -> Result<String, ApiError> {
        let rows = self.fetch_positions(caller).await?;
        match_position(&mut req, &rows).map_err(|e| {
            warn!(
                user_id = %caller.user_id,
                exchange = %req.exchange,
                security_id = %req.exchange_token,
                product_from = %req.position_from,
                "no position eligible for conversion"
            );
            e
        })?;

        let body = translate::conversion_request(
            &req,
            caller,
            &self.settings.source,
            &self.settings.market_type,
            &self.settings.user_type,
        );
        let env = self
            .call(
                "convert_position",
                &self.settings.paths.position_convert,
                &body,
                TimeoutClass::Long,
            )
            .await?;

        info!(
            security_id = %req.exchange_token,
            from = %req.position_from,
            to = %req.position_to,
            "position converted"
        );
        Ok(env.message)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn fetch_positions(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Vec<VendorPositionRow>, ApiError> {
        let body = translate::position_book_query(caller, &self.settings.source);
        let env = self
            .call(
                "position_book",
                &self.settings.paths.position_book,
                &body,
                TimeoutClass::Short,
            )
            .await?;
        let rows: Option<Vec<VendorPositionRow>> = self.decode("position_book", env.data)?;
        Ok(rows.unwrap_or_default())
    }

    fn decode<T: serde::de::DeserializeOwned>(
        &self,
        op: &'static str,
        data: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        decode_data(data).map_err(|e| {
            error!(op, error = %e, "vendor data decode failed");
            self.settings
                .classifier
                .classify(VendorFailure::Undecodable(&e))
        })
    }

    /// One vendor round trip. Returns the envelope only when the vendor
    /// reported success; every other outcome is classified.
    async fn call<B: Serialize>(
        &self,
        op: &'static str,
        path: &str,
        body: &B,
        timeout: TimeoutClass,
    ) -> Result<VendorEnvelope, ApiError> {
        let classifier = &self.settings.classifier;
        let url = self.settings.url(path);

        let body = serde_json::to_vec(body).map_err(|e| {
            error!(op, error = %e, "vendor request encode failed");
            ApiError::new(ErrorKind::InternalServerError, "")
        })?;
        debug!(op, %url, body = %String::from_utf8_lossy(&body), "vendor request");

        let call = VendorCall {
            method: HttpMethod::Post,
            url: url.clone(),
            body,
            headers: self.settings.headers.clone(),
            timeout: match timeout {
                TimeoutClass::Short => self.settings.short_timeout,
                TimeoutClass::Long => self.settings.long_timeout,
            },
        };

        let started = Instant::now();
        let reply = self.invoker.invoke(call).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let reply = match reply {
            Ok(r) => r,
            Err(e) => {
                error!(op, %url, latency_ms, error = %e, "vendor api failure");
                return Err(classifier.classify(VendorFailure::Transport(&e)));
            }
        };
        info!(op, %url, status = reply.status, latency_ms, "vendor call");

        if reply.status != 200 {
            error!(op, %url, status = reply.status, "vendor connection failure");
            return Err(classifier.classify(VendorFailure::HttpStatus(reply.status)));
        }

        let env = decode_envelope(&reply.body).map_err(|e| {
            error!(op, %url, error = %e, "vendor response decode failed");
            classifier.classify(VendorFailure::Undecodable(&e))
        })?;

        if env.status != self.settings.success_token {
            warn!(
                op,
                status = %env.status,
                error_code = %env.error_code,
                message = %env.message,
                "vendor rejected request"
            );
            return Err(classifier.classify(VendorFailure::Rejected {
                error_code: &env.error_code,
                message: &env.message,
            }));
        }

        Ok(env)
    }
}
