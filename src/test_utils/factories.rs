//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible
//! defaults. Use the closure parameter to override specific fields as needed.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{
    domain::entities::subscription::{BillingCycle, Subscription},
    use_cases::subscription::NewSubscription,
};

pub fn test_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Create a stored subscription with sensible defaults.
pub fn create_test_subscription(overrides: impl FnOnce(&mut Subscription)) -> Subscription {
    let mut subscription = Subscription {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Netflix".to_string(),
        description: Some("Standard subscription".to_string()),
        amount: dec!(15.99),
        currency: "USD".to_string(),
        billing_cycle: BillingCycle::Monthly,
        start_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        next_payment_date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        category: "Entertainment".to_string(),
        logo: Some("N".to_string()),
        website: Some("https://netflix.com".to_string()),
        color: Some("#E50914".to_string()),
        reminder_days: 3,
        active: true,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut subscription);
    subscription
}

/// Create a creation payload with sensible defaults.
pub fn create_test_new_subscription(
    overrides: impl FnOnce(&mut NewSubscription),
) -> NewSubscription {
    let mut input = NewSubscription {
        name: "Netflix".to_string(),
        description: Some("Standard subscription".to_string()),
        amount: dec!(15.99),
        currency: None,
        billing_cycle: BillingCycle::Monthly,
        start_date: "2023-01-15".to_string(),
        next_payment_date: None,
        category: "Entertainment".to_string(),
        logo: None,
        website: None,
        color: None,
        reminder_days: None,
        active: None,
    };
    overrides(&mut input);
    input
}
