//! Upcoming-payment window selection and due-status classification.
//!
//! "Now" is always threaded in by the caller so every function here stays
//! deterministic under test. Payment dates are local calendar dates anchored
//! at midnight.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::entities::subscription::{DueStatus, Subscription};

const SECS_PER_DAY: i64 = 86_400;

/// Whole days until the payment, rounded up: a payment 12 hours away counts
/// as 1 day left, not 0. Zero or negative means due today or overdue.
pub fn days_till_payment(next_payment_date: NaiveDate, now: NaiveDateTime) -> i64 {
    let due = next_payment_date.and_time(NaiveTime::MIN);
    let secs = (due - now).num_seconds();
    secs.div_euclid(SECS_PER_DAY) + i64::from(secs.rem_euclid(SECS_PER_DAY) > 0)
}

/// Classifies urgency. Precedence: due/overdue, then the inclusive reminder
/// window, then everything further out.
pub fn classify(days_till: i64, reminder_days: i32) -> DueStatus {
    if days_till <= 0 {
        DueStatus::Due
    } else if days_till <= i64::from(reminder_days) {
        DueStatus::DueSoon
    } else {
        DueStatus::Upcoming
    }
}

pub fn due_status(
    next_payment_date: NaiveDate,
    reminder_days: i32,
    now: NaiveDateTime,
) -> DueStatus {
    classify(days_till_payment(next_payment_date, now), reminder_days)
}

/// Display text for a days-remaining figure. Presentation only; overdue and
/// due-today carry the same urgency in [`classify`].
pub fn status_label(days_till: i64) -> String {
    match days_till {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due Today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}

/// Active subscriptions whose next payment falls within
/// `[today, today + days_ahead]`, both endpoints inclusive. Past-due records
/// are excluded; they are overdue, not upcoming.
pub fn upcoming_within<'a>(
    subscriptions: &'a [Subscription],
    today: NaiveDate,
    days_ahead: u32,
) -> Vec<&'a Subscription> {
    let end = today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(NaiveDate::MAX);
    subscriptions
        .iter()
        .filter(|s| s.active && s.next_payment_date >= today && s.next_payment_date <= end)
        .collect()
}
