//! Defaults applied when a request leaves a parameter out.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::gateway::binder::{BindError, Params};

pub const BROWSE_LIMIT: i32 = 20;
pub const BROWSE_OFFSET: i32 = 0;
pub const BROWSE_SORT: &str = "newest";
pub const BROWSE_MIN_PRICE: Decimal = Decimal::ZERO;
pub const BROWSE_MAX_PRICE: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 0);

pub const ADMIN_PRODUCT_LIMIT: i32 = 50;
pub const CART_QUANTITY: i32 = 1;
pub const BEST_SELLER_LIMIT: i32 = 10;

/// Days covered by a report when no start date is given.
pub const REPORT_WINDOW_DAYS: i64 = 30;

/// Resolve the inclusive report range `[start_date, end_date]`.
///
/// Each bound falls back independently: start to `today - 30 days`, end to
/// `today`.
pub fn report_window(params: &Params, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), BindError> {
    let start = params
        .date("start_date")?
        .unwrap_or(today - Duration::days(REPORT_WINDOW_DAYS));
    let end = params.date("end_date")?.unwrap_or(today);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_report_window_defaults_to_trailing_30_days() {
        let (start, end) = report_window(&Params::new(), day(2025, 3, 15)).unwrap();
        assert_eq!(start, day(2025, 2, 13));
        assert_eq!(end, day(2025, 3, 15));
    }

    #[test]
    fn test_report_window_bounds_fall_back_independently() {
        let params = Params::new().with("start_date", "2025-01-01");
        let (start, end) = report_window(&params, day(2025, 3, 15)).unwrap();
        assert_eq!(start, day(2025, 1, 1));
        assert_eq!(end, day(2025, 3, 15));

        let params = Params::new().with("end_date", "2025-02-01");
        let (start, end) = report_window(&params, day(2025, 3, 15)).unwrap();
        assert_eq!(start, day(2025, 2, 13));
        assert_eq!(end, day(2025, 2, 1));
    }

    #[test]
    fn test_report_window_rejects_bad_dates() {
        let params = Params::new().with("start_date", "yesterday");
        assert!(report_window(&params, day(2025, 3, 15)).is_err());
    }

    #[test]
    fn test_max_price_sentinel() {
        assert_eq!(BROWSE_MAX_PRICE, Decimal::from(999_999_999));
    }
}
