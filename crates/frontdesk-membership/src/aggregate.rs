use chrono::NaiveDate;

use frontdesk_data::{DashboardStats, Member};

use crate::{MembershipStatus, Urgency};

/// Count members for the dashboard.
///
/// Every member with the trainee flag counts as an active trainer,
/// regardless of whether the plan has expired.
pub fn aggregate(members: &[Member], today: NaiveDate) -> DashboardStats {
    members
        .iter()
        .fold(DashboardStats::default(), |mut stats, member| {
            stats.total_members += 1;
            if member.trainee {
                stats.active_trainers += 1;
            }
            if member.urgency(today) == Urgency::ExpiringSoon {
                stats.expiring_soon += 1;
            }
            stats
        })
}

/// Case insensitive substring search over name and address.
/// The order of the members is kept.
pub fn search(members: &[Member], query: &str) -> Vec<Member> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return members.to_vec();
    }
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&query) || m.address.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Members whose plan runs out within the next `days` days,
/// not counting the ones already expired.
pub fn expiring_within(members: &[Member], today: NaiveDate, days: u32) -> Vec<Member> {
    members
        .iter()
        .filter(|m| {
            let left = m.days_remaining(today);
            left > 0 && left <= i64::from(days)
        })
        .cloned()
        .collect()
}
