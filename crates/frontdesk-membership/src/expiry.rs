use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use frontdesk_data::Member;

/// A membership with this many days left or fewer is expired.
pub const EXPIRED_AT_DAYS: i64 = 0;

/// A membership with this many days left or fewer, but not
/// expired, is expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Urgency {
    Expired,
    ExpiringSoon,
    Healthy,
}

/// Whole calendar days from today until the end date.
/// Zero means the membership ends today, negative values
/// mean it already ended.
pub fn days_remaining(end_date: NaiveDate, today: NaiveDate) -> i64 {
    end_date.signed_duration_since(today).num_days()
}

pub fn urgency_tier(days_remaining: i64) -> Urgency {
    if days_remaining <= EXPIRED_AT_DAYS {
        Urgency::Expired
    } else if days_remaining <= EXPIRING_SOON_DAYS {
        Urgency::ExpiringSoon
    } else {
        Urgency::Healthy
    }
}

pub fn is_expired(end_date: NaiveDate, today: NaiveDate) -> bool {
    urgency_tier(days_remaining(end_date, today)) == Urgency::Expired
}

pub fn is_expiring_soon(end_date: NaiveDate, today: NaiveDate) -> bool {
    urgency_tier(days_remaining(end_date, today)) == Urgency::ExpiringSoon
}

/// Expiry of a member's current plan.
pub trait MembershipStatus {
    fn days_remaining(&self, today: NaiveDate) -> i64;

    fn urgency(&self, today: NaiveDate) -> Urgency {
        urgency_tier(self.days_remaining(today))
    }
}

impl MembershipStatus for Member {
    fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_remaining(self.end_date, today)
    }
}
