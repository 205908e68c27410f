use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a subscription charges. Closed set; anything else stored in the
/// database is bad data and must be rejected at parse time, not defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Biweekly => "biweekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        }
    }

    /// Parses a stored cycle value. Returns `None` for anything outside the
    /// enumeration so callers surface an invalid-cycle error instead of
    /// silently mis-costing the record.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Some(BillingCycle::Weekly),
            "biweekly" => Some(BillingCycle::Biweekly),
            "monthly" => Some(BillingCycle::Monthly),
            "quarterly" => Some(BillingCycle::Quarterly),
            "yearly" => Some(BillingCycle::Yearly),
            _ => None,
        }
    }
}

/// Urgency of a subscription's next payment relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Payment is today or already past. Display text distinguishes the two,
    /// urgency handling does not.
    Due,
    DueSoon,
    Upcoming,
}

impl DueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueStatus::Due => "due",
            DueStatus::DueSoon => "due_soon",
            DueStatus::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    /// ISO-4217-like code. Stored and echoed back, never converted.
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub start_date: NaiveDate,
    /// Derived from `start_date` + `billing_cycle` at creation; edits may set
    /// an arbitrary date afterwards.
    pub next_payment_date: NaiveDate,
    pub category: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub color: Option<String>,
    pub reminder_days: i32,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
