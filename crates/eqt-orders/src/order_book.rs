//! Order book normalization and filtering.
//!
//! Vendor status → client status / section:
//!
//! | Vendor status              | Client status        | Section  |
//! |----------------------------|----------------------|----------|
//! | Transit, Pending, Modified | Pending              | Open     |
//! | Part-traded                | Partially Executed   | Open     |
//! | Traded                     | Executed             | Executed |
//! | Rejected                   | Rejected             | Executed |
//! | Cancelled                  | Cancelled            | Executed |
//!
//! Client values map onto themselves, so normalizing twice is a no-op.
//! Statuses outside the table pass through unchanged with no section.

use eqt_schemas::vendor::VendorOrderRow;
use eqt_schemas::{OrderBookQuery, OrderBookRow};

use crate::error::ApiError;

pub const SECTION_OPEN: &str = "Open";
pub const SECTION_EXECUTED: &str = "Executed";

pub const EMPTY_ORDER_BOOK: &str = "order not found in OrderBook.";

/// Vendor statuses counted as open, lowercased.
const OPEN_STATUSES: [&str; 4] = ["transit", "pending", "modified", "part-traded"];
/// Vendor statuses counted as executed (closed), lowercased.
const EXECUTED_STATUSES: [&str; 3] = ["traded", "rejected", "cancelled"];

/// `(client status, section)` for a vendor status.
pub fn map_status(vendor_status: &str) -> (String, Option<&'static str>) {
    let (status, section) = match vendor_status {
        "Transit" | "Pending" | "Modified" => ("Pending", SECTION_OPEN),
        "Part-traded" | "Partially Executed" => ("Partially Executed", SECTION_OPEN),
        "Traded" | "Executed" => ("Executed", SECTION_EXECUTED),
        "Rejected" => ("Rejected", SECTION_EXECUTED),
        "Cancelled" => ("Cancelled", SECTION_EXECUTED),
        other => return (other.to_string(), None),
    };
    (status.to_string(), Some(section))
}

/// `security_id + "_" + exchange`.
pub fn stream_symbol(security_id: &str, exchange: &str) -> String {
    format!("{security_id}_{exchange}")
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Query filters, trimmed and lowercased. Blank filters are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFilter {
    search_txt: Option<String>,
    segment: Option<String>,
    options_type: Option<String>,
    section: Option<String>,
}

impl BookFilter {
    pub fn from_query(q: &OrderBookQuery) -> Self {
        Self {
            search_txt: normalize(q.search_txt.as_deref()),
            segment: normalize(q.segment.as_deref()),
            options_type: normalize(q.options_type.as_deref()),
            section: normalize(q.status.as_deref()),
        }
    }

    /// Conjunctive match against the raw vendor row. An unknown section
    /// value matches nothing.
    pub fn matches(&self, row: &VendorOrderRow) -> bool {
        if let Some(txt) = &self.search_txt {
            let in_symbol = row.symbol.to_lowercase().contains(txt.as_str());
            let in_name = row.display_name.to_lowercase().contains(txt.as_str());
            if !in_symbol && !in_name {
                return false;
            }
        }
        if let Some(seg) = &self.segment {
            if row.segment.to_lowercase() != *seg {
                return false;
            }
        }
        if let Some(opt) = &self.options_type {
            if row.opt_type.to_lowercase() != *opt {
                return false;
            }
        }
        if let Some(section) = &self.section {
            let status = row.status.to_lowercase();
            let status = status.as_str();
            let in_section = match section.as_str() {
                "open" => OPEN_STATUSES.contains(&status),
                "executed" => EXECUTED_STATUSES.contains(&status),
                _ => false,
            };
            if !in_section {
                return false;
            }
        }
        true
    }
}

fn normalize(v: Option<&str>) -> Option<String> {
    let t = v?.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

pub fn normalize_row(raw: VendorOrderRow) -> OrderBookRow {
    let (status, section) = map_status(&raw.status);
    let stream_symbol = stream_symbol(&raw.security_id, &raw.exchange);
    OrderBookRow {
        symbol: raw.symbol,
        display_name: raw.display_name,
        security_id: raw.security_id,
        exchange: raw.exchange,
        segment: raw.segment,
        opt_type: raw.opt_type,
        expiry_date: raw.expiry_date,
        lot_size: raw.lot_size,
        quantity: raw.quantity,
        disc_quantity: raw.disc_quantity,
        remaining_quantity: raw.remaining_quantity,
        traded_qty: raw.traded_qty,
        dq_qty_rem: raw.dq_qty_rem,
        rem_qty_tot_qty: raw.rem_qty_tot_qty,
        price: raw.price,
        trigger_price: raw.trigger_price,
        traded_price: raw.traded_price,
        avg_traded_price: raw.avg_traded_price,
        status,
        section: section.map(str::to_string),
        error_code: raw.error_code,
        order_no: raw.order_no,
        exch_order_no: raw.exch_order_no,
        serial_no: raw.serial_no,
        order_date_time: raw.order_date_time,
        exch_order_time: raw.exch_order_time,
        last_updated_time: raw.last_updated_time,
        good_till_days_date: raw.good_till_days_date,
        txn_type: raw.txn_type,
        product: raw.product,
        product_name: raw.product_name,
        order_type: raw.order_type,
        validity: raw.validity,
        participant_type: raw.participant_type,
        expiry_flag: raw.expiry_flag,
        stream_symbol,
    }
}

/// Filter, then normalize. An empty result is `NoDataFound`, never an empty
/// success list.
pub fn build_order_book(
    rows: Vec<VendorOrderRow>,
    query: &OrderBookQuery,
) -> Result<Vec<OrderBookRow>, ApiError> {
    let filter = BookFilter::from_query(query);
    let out: Vec<OrderBookRow> = rows
        .into_iter()
        .filter(|r| filter.matches(r))
        .map(normalize_row)
        .collect();

    if out.is_empty() {
        return Err(ApiError::no_data(EMPTY_ORDER_BOOK));
    }
    Ok(out)
}
