//! Monthly-equivalent spend normalization.
//!
//! Subscriptions on different cycles are summed by converting each periodic
//! amount into what it costs per month. Inactive records contribute nothing.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::entities::subscription::{BillingCycle, Subscription};

/// Converts a periodic amount into its monthly-equivalent figure.
pub fn monthly_equivalent(amount: Decimal, cycle: BillingCycle) -> Decimal {
    match cycle {
        BillingCycle::Weekly => amount * Decimal::from(52) / Decimal::from(12),
        BillingCycle::Biweekly => amount * Decimal::from(26) / Decimal::from(12),
        BillingCycle::Monthly => amount,
        BillingCycle::Quarterly => amount / Decimal::from(3),
        BillingCycle::Yearly => amount / Decimal::from(12),
    }
}

/// Sum of monthly-equivalents over active subscriptions.
pub fn monthly_spending(subscriptions: &[Subscription]) -> Decimal {
    subscriptions
        .iter()
        .filter(|s| s.active)
        .map(|s| monthly_equivalent(s.amount, s.billing_cycle))
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub monthly_spending: Decimal,
    /// Always `monthly_spending * 12`, never recomputed independently.
    pub yearly_spending: Decimal,
    pub active_count: usize,
    pub total_count: usize,
    pub average_per_subscription: Decimal,
}

pub fn spending_summary(subscriptions: &[Subscription]) -> SpendingSummary {
    let monthly = monthly_spending(subscriptions);
    let active_count = subscriptions.iter().filter(|s| s.active).count();
    let average = if active_count == 0 {
        Decimal::ZERO
    } else {
        monthly / Decimal::from(active_count as u64)
    };
    SpendingSummary {
        monthly_spending: monthly,
        yearly_spending: monthly * Decimal::from(12),
        active_count,
        total_count: subscriptions.len(),
        average_per_subscription: average,
    }
}

/// Number of active subscriptions per category string.
pub fn count_by_category(subscriptions: &[Subscription]) -> HashMap<String, usize> {
    let mut categories: HashMap<String, usize> = HashMap::new();
    for sub in subscriptions.iter().filter(|s| s.active) {
        *categories.entry(sub.category.clone()).or_insert(0) += 1;
    }
    categories
}
