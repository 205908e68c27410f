//! Next-payment-date projection.
//!
//! Calendar arithmetic, not fixed day counts: month-based cycles advance by
//! calendar months and clamp to the last day of the target month when the
//! day-of-month does not exist there (2023-01-31 + 1 month = 2023-02-28).

use chrono::{Days, Months, NaiveDate};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::subscription::BillingCycle,
};

/// Projects the date exactly one cycle after `anchor`.
pub fn advance(anchor: NaiveDate, cycle: BillingCycle) -> AppResult<NaiveDate> {
    let next = match cycle {
        BillingCycle::Weekly => anchor.checked_add_days(Days::new(7)),
        BillingCycle::Biweekly => anchor.checked_add_days(Days::new(14)),
        BillingCycle::Monthly => anchor.checked_add_months(Months::new(1)),
        BillingCycle::Quarterly => anchor.checked_add_months(Months::new(3)),
        BillingCycle::Yearly => anchor.checked_add_months(Months::new(12)),
    };
    next.ok_or_else(|| {
        AppError::InvalidDate(format!(
            "cannot advance {anchor} by one {} cycle",
            cycle.as_str()
        ))
    })
}

/// Parses a `YYYY-MM-DD` anchor date supplied by a caller.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(raw.to_string()))
}
