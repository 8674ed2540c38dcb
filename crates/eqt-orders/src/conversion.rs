//! Position conversion eligibility.
//!
//! Rows are scanned in vendor order and the first eligible row wins. The
//! resolved segment is written on every examined non-flat row: the matched
//! row's segment on a hit, the equity code on a miss. After a failed scan
//! the request therefore holds the equity code.

use eqt_schemas::vendor::VendorPositionRow;
use eqt_schemas::{ConversionRequest, Segment, Side};

use crate::error::ApiError;
use crate::validation::ValidationError;

pub const NO_MATCHING_POSITION: &str = "no matching open positions available to convert";

/// Side implied by a signed net quantity. `None` when flat.
pub fn position_side(net_qty: i64) -> Option<Side> {
    match net_qty {
        0 => None,
        q if q > 0 => Some(Side::Buy),
        _ => Some(Side::Sell),
    }
}

fn eligible(req: &ConversionRequest, row: &VendorPositionRow, side: Side) -> bool {
    side == req.position_type
        && row.exchange == req.exchange
        && row.security_id == req.exchange_token
        && row.product == req.position_from
        && row.net_qty.unsigned_abs() >= req.quantity.unsigned_abs()
}

/// Resolve `req.segment` from the first eligible position.
///
/// Returns the index of the matched row, or `BadRequest` when the request
/// quantity is not positive or nothing qualifies.
pub fn match_position(
    req: &mut ConversionRequest,
    rows: &[VendorPositionRow],
) -> Result<usize, ApiError> {
    if req.quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity.into());
    }
    for (idx, row) in rows.iter().enumerate() {
        let Some(side) = position_side(row.net_qty) else {
            continue;
        };
        if eligible(req, row, side) {
            req.segment = row.segment.clone();
            return Ok(idx);
        }
        req.segment = Segment::Equity.code().to_string();
    }
    Err(ApiError::bad_request(NO_MATCHING_POSITION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn position(net_qty: i64, segment: &str, product: &str) -> VendorPositionRow {
        VendorPositionRow {
            security_id: "1594".to_string(),
            exchange: "NSE".to_string(),
            segment: segment.to_string(),
            product: product.to_string(),
            net_qty,
            ..Default::default()
        }
    }

    fn request(side: Side, qty: i64) -> ConversionRequest {
        ConversionRequest {
            position_type: side,
            exchange: "NSE".to_string(),
            exchange_token: "1594".to_string(),
            position_from: "C".to_string(),
            position_to: "I".to_string(),
            quantity: qty,
            segment: String::new(),
        }
    }

    #[test]
    fn skips_flat_rows_and_copies_segment() {
        let rows = vec![position(0, "M", "C"), position(100, "D", "C")];
        let mut req = request(Side::Buy, 50);
        assert_eq!(match_position(&mut req, &rows), Ok(1));
        assert_eq!(req.segment, "D");
    }

    #[test]
    fn first_match_wins() {
        let rows = vec![position(60, "E", "C"), position(500, "D", "C")];
        let mut req = request(Side::Buy, 50);
        assert_eq!(match_position(&mut req, &rows), Ok(0));
        assert_eq!(req.segment, "E");
    }

    #[test]
    fn short_positions_match_sell_by_absolute_quantity() {
        let rows = vec![position(-80, "D", "C")];
        let mut req = request(Side::Sell, 80);
        assert_eq!(match_position(&mut req, &rows), Ok(0));

        let mut req = request(Side::Buy, 10);
        assert!(match_position(&mut req, &rows).is_err());
    }

    #[test]
    fn insufficient_quantity_does_not_match() {
        let rows = vec![position(40, "D", "C")];
        let mut req = request(Side::Buy, 50);
        let err = match_position(&mut req, &rows).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.detail, NO_MATCHING_POSITION);
    }

    #[test]
    fn miss_leaves_equity_segment_from_last_examined_row() {
        let rows = vec![position(100, "D", "M"), position(5, "M", "C"), position(0, "C", "C")];
        let mut req = request(Side::Buy, 50);
        assert!(match_position(&mut req, &rows).is_err());
        assert_eq!(req.segment, "E");
    }

    #[test]
    fn flat_rows_do_not_overwrite_segment() {
        let mut req = request(Side::Buy, 50);
        assert!(match_position(&mut req, &[position(0, "D", "C")]).is_err());
        assert_eq!(req.segment, "");
    }

    #[test]
    fn product_and_instrument_must_match_exactly() {
        let mut other_exchange = position(100, "E", "C");
        other_exchange.exchange = "BSE".to_string();
        let mut other_token = position(100, "E", "C");
        other_token.security_id = "15940".to_string();
        let rows = vec![other_exchange, other_token, position(100, "E", "c")];
        let mut req = request(Side::Buy, 1);
        assert!(match_position(&mut req, &rows).is_err());
    }

    #[test]
    fn non_positive_request_quantity_is_rejected_as_quantity() {
        let rows = vec![position(100, "D", "C")];
        for qty in [0, -5] {
            let mut req = request(Side::Buy, qty);
            let err = match_position(&mut req, &rows).unwrap_err();
            assert_eq!(err.kind, ErrorKind::BadRequest);
            assert_eq!(err.detail, "Quantity must be greater than zero");
            assert_eq!(req.segment, "", "rows are not scanned");
        }
    }
}
