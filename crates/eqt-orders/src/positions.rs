//! Position book profit / loss.

use eqt_schemas::vendor::VendorPositionRow;
use eqt_schemas::{PositionBook, PositionRow};

use crate::error::ApiError;
use crate::order_book::stream_symbol;

pub const EMPTY_POSITION_BOOK: &str = "order not found in PositionBook.";

/// Mark-to-market on the open quantity.
///
/// Long: `net_qty * (ltp - buy_avg)`. Short: `|net_qty| * (sell_avg - ltp)`,
/// so a short marked below its sell average is a gain. Flat: `0`.
pub fn unrealized_pl(net_qty: i64, buy_avg: f64, sell_avg: f64, ltp: f64) -> f64 {
    match net_qty {
        0 => 0.0,
        q if q > 0 => q as f64 * (ltp - buy_avg),
        q => q.unsigned_abs() as f64 * (sell_avg - ltp),
    }
}

pub fn position_row(raw: VendorPositionRow) -> PositionRow {
    let unrealised = unrealized_pl(raw.net_qty, raw.buy_avg, raw.sell_avg, raw.last_traded_price);
    PositionRow {
        stream_symbol: stream_symbol(&raw.security_id, &raw.exchange),
        total_profit_loss: unrealised + raw.realised_profit,
        unrealised_profit: unrealised,
        symbol: raw.symbol,
        display_name: raw.display_name,
        security_id: raw.security_id,
        exchange: raw.exchange,
        segment: raw.segment,
        product: raw.product,
        expiry_date: raw.expiry_date,
        lot_size: raw.lot_size,
        net_qty: raw.net_qty,
        buy_avg: raw.buy_avg,
        sell_avg: raw.sell_avg,
        net_avg: raw.net_avg,
        last_traded_price: raw.last_traded_price,
        realised_profit: raw.realised_profit,
        gross_qty: raw.gross_qty,
        gross_val: raw.gross_val,
        tot_buy_qty: raw.tot_buy_qty,
        tot_buy_val: raw.tot_buy_val,
        tot_sell_qty: raw.tot_sell_qty,
        tot_sell_val: raw.tot_sell_val,
        tot_sell_val_day: raw.tot_sell_val_day,
        net_val: raw.net_val,
    }
}

/// Per-row P&L plus the aggregate across every row. An empty book is
/// `NoDataFound`.
pub fn build_position_book(rows: Vec<VendorPositionRow>) -> Result<PositionBook, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::no_data(EMPTY_POSITION_BOOK));
    }
    let order_position: Vec<PositionRow> = rows.into_iter().map(position_row).collect();
    let total_profit_loss = order_position.iter().map(|r| r.total_profit_loss).sum();
    Ok(PositionBook {
        order_position,
        total_profit_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn raw(net_qty: i64, buy_avg: f64, sell_avg: f64, ltp: f64, realised: f64) -> VendorPositionRow {
        VendorPositionRow {
            security_id: "1594".to_string(),
            exchange: "NSE".to_string(),
            net_qty,
            buy_avg,
            sell_avg,
            last_traded_price: ltp,
            realised_profit: realised,
            ..Default::default()
        }
    }

    #[test]
    fn flat_position_has_no_unrealized() {
        assert_eq!(unrealized_pl(0, 10.0, 20.0, 15.0), 0.0);
    }

    #[test]
    fn long_marks_against_buy_average() {
        assert_eq!(unrealized_pl(100, 10.0, 0.0, 12.0), 200.0);
        assert_eq!(unrealized_pl(100, 10.0, 0.0, 9.0), -100.0);
    }

    #[test]
    fn short_below_sell_average_is_a_gain() {
        assert_eq!(unrealized_pl(-50, 0.0, 20.0, 18.0), 100.0);
        assert_eq!(unrealized_pl(-50, 0.0, 20.0, 21.0), -50.0);
    }

    #[test]
    fn totals_add_realised_and_aggregate() {
        let book = build_position_book(vec![
            raw(100, 10.0, 0.0, 12.0, 5.0),
            raw(-50, 0.0, 20.0, 18.0, -10.0),
            raw(0, 0.0, 0.0, 30.0, 7.5),
        ])
        .unwrap();
        assert_eq!(book.order_position[0].total_profit_loss, 205.0);
        assert_eq!(book.order_position[1].total_profit_loss, 90.0);
        assert_eq!(book.order_position[2].unrealised_profit, 0.0);
        assert_eq!(book.total_profit_loss, 302.5);
        assert_eq!(book.order_position[0].stream_symbol, "1594_NSE");
    }

    #[test]
    fn empty_book_is_no_data() {
        let err = build_position_book(Vec::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoDataFound);
        assert_eq!(err.http_status, 404);
        assert_eq!(err.detail, EMPTY_POSITION_BOOK);
    }
}
