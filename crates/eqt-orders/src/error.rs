//! Client-facing error taxonomy.
//!
//! Every failed operation yields exactly one [`ApiError`], which the
//! transport renders as one entry of the envelope's `errors` list.

use std::fmt;

use eqt_schemas::ErrorDetail;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client input rejected, or vendor rejected it as invalid.
    BadRequest,
    /// No caller identity on the request. Raised at the transport boundary.
    Unauthorized,
    /// Vendor unreachable (transport error, timeout).
    VendorApiFailure,
    /// Vendor reachable but answered with a non-200 status.
    VendorConnectionFailure,
    /// Vendor payload could not be decoded.
    JsonUnmarshalError,
    /// Vendor business failure not otherwise classified.
    InternalServerError,
    /// Reserved OMS rejection; a soft failure (`status: false`, HTTP 200).
    VendorOmsError,
    /// Empty result after query / filter.
    NoDataFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::VendorApiFailure => "VendorApiFailure",
            ErrorKind::VendorConnectionFailure => "VendorConnectionFailure",
            ErrorKind::JsonUnmarshalError => "JsonUnmarshalError",
            ErrorKind::InternalServerError => "InternalServerError",
            ErrorKind::VendorOmsError => "VendorOMSError",
            ErrorKind::NoDataFound => "NoDataFound",
        }
    }

    /// HTTP status used when the error carries no vendor status of its own.
    pub fn default_http_status(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NoDataFound => 404,
            ErrorKind::VendorOmsError => 200,
            ErrorKind::VendorApiFailure
            | ErrorKind::VendorConnectionFailure
            | ErrorKind::JsonUnmarshalError
            | ErrorKind::InternalServerError => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub detail: String,
    pub http_status: u16,
}

impl ApiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            http_status: kind.default_http_status(),
        }
    }

    pub fn with_status(mut self, http_status: u16) -> Self {
        self.http_status = http_status;
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, detail)
    }

    pub fn no_data(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoDataFound, detail)
    }

    /// `true` for the reserved OMS rejection, which the contract reports as
    /// `status: false` on an HTTP 200 rather than as an HTTP error.
    pub fn is_soft(&self) -> bool {
        self.kind == ErrorKind::VendorOmsError
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            kind: self.kind.as_str().to_string(),
            detail: self.detail.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{} (http {})", self.kind, self.http_status)
        } else {
            write!(f, "{} (http {}): {}", self.kind, self.http_status, self.detail)
        }
    }
}

impl std::error::Error for ApiError {}
