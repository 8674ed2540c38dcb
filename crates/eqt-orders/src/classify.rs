//! Vendor failure classification.
//!
//! Precedence, first applicable wins:
//!
//! | # | Outcome                             | Kind                      | HTTP          |
//! |---|-------------------------------------|---------------------------|---------------|
//! | 1 | no response (transport / timeout)   | `VendorApiFailure`        | 500           |
//! | 2 | non-200 status                      | `VendorConnectionFailure` | vendor status |
//! | 3 | body not decodable                  | `JsonUnmarshalError`      | 500           |
//! | 4 | reserved OMS code                   | `VendorOMSError`          | 200 (soft)    |
//! | 5 | code mapped to 400                  | `BadRequest`              | 400           |
//! | 6 | code mapped to 500, or unmapped     | `InternalServerError`     | 500           |
//!
//! Unmapped codes never classify as 400 and carry an empty detail.

use std::collections::BTreeMap;

use crate::error::{ApiError, ErrorKind};
use crate::invoker::TransportError;
use crate::translate::TranslateError;

/// What went wrong with one vendor call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VendorFailure<'a> {
    Transport(&'a TransportError),
    HttpStatus(u16),
    Undecodable(&'a TranslateError),
    Rejected { error_code: &'a str, message: &'a str },
}

/// Vendor error-code lookup plus the reserved OMS code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorClassifier {
    codes: BTreeMap<String, u16>,
    oms_error_code: String,
}

impl ErrorClassifier {
    pub fn new(codes: BTreeMap<String, u16>, oms_error_code: impl Into<String>) -> Self {
        Self {
            codes,
            oms_error_code: oms_error_code.into(),
        }
    }

    pub fn oms_error_code(&self) -> &str {
        &self.oms_error_code
    }

    pub fn classify(&self, failure: VendorFailure<'_>) -> ApiError {
        match failure {
            VendorFailure::Transport(e) => ApiError::new(ErrorKind::VendorApiFailure, e.to_string()),
            VendorFailure::HttpStatus(status) => ApiError::new(
                ErrorKind::VendorConnectionFailure,
                format!("vendor responded with http {status}"),
            )
            .with_status(status),
            VendorFailure::Undecodable(e) => {
                ApiError::new(ErrorKind::JsonUnmarshalError, e.to_string())
            }
            VendorFailure::Rejected {
                error_code,
                message,
            } => self.classify_code(error_code, message),
        }
    }

    fn classify_code(&self, error_code: &str, message: &str) -> ApiError {
        let detail = clean_detail(message);
        if !self.oms_error_code.is_empty() && error_code == self.oms_error_code {
            return ApiError::new(ErrorKind::VendorOmsError, detail);
        }
        match self.codes.get(error_code).copied() {
            Some(400) => ApiError::bad_request(detail),
            Some(_) => ApiError::new(ErrorKind::InternalServerError, detail),
            None => ApiError::new(ErrorKind::InternalServerError, ""),
        }
    }
}

/// Vendor messages sometimes arrive with a `:` separator prefix.
fn clean_detail(message: &str) -> String {
    message.trim().trim_start_matches(':').trim_start().to_string()
}
