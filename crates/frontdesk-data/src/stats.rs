use serde::{Deserialize, Serialize};

/// Point in time figures for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: u64,
    pub active_trainers: u64,
    pub expiring_soon: u64,
}
