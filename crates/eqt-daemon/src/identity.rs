//! Caller identity from request headers.
//!
//! The upstream auth layer authenticates the caller and forwards who they
//! are in `x-user-id`, optionally with distinct `x-client-id` /
//! `x-entity-id`. Absent or blank `x-user-id` is `Unauthorized`.

use axum::http::HeaderMap;
use eqt_orders::{ApiError, CallerIdentity, ErrorKind};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const ENTITY_ID_HEADER: &str = "x-entity-id";

pub fn caller_from_headers(headers: &HeaderMap) -> Result<CallerIdentity, ApiError> {
    let user_id = header_str(headers, USER_ID_HEADER)
        .ok_or_else(|| ApiError::new(ErrorKind::Unauthorized, "missing caller identity"))?;

    let mut caller = CallerIdentity::new(user_id);
    if let Some(client_id) = header_str(headers, CLIENT_ID_HEADER) {
        caller = caller.with_client_id(client_id);
    }
    if let Some(entity_id) = header_str(headers, ENTITY_ID_HEADER) {
        caller = caller.with_entity_id(entity_id);
    }
    Ok(caller)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
