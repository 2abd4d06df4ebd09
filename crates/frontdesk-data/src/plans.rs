use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Membership plans offered at the front desk.
///
/// The plan codes (`1day`, `1week`, ...) are used on the wire and
/// in the members table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT")]
pub enum PlanType {
    #[serde(rename = "1day")]
    #[sqlx(rename = "1day")]
    OneDay,
    #[serde(rename = "1week")]
    #[sqlx(rename = "1week")]
    OneWeek,
    #[default]
    #[serde(rename = "1month")]
    #[sqlx(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    #[sqlx(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    #[sqlx(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    #[sqlx(rename = "1year")]
    OneYear,
}

impl PlanType {
    pub const ALL: [PlanType; 6] = [
        PlanType::OneDay,
        PlanType::OneWeek,
        PlanType::OneMonth,
        PlanType::ThreeMonths,
        PlanType::SixMonths,
        PlanType::OneYear,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PlanType::OneDay => "1day",
            PlanType::OneWeek => "1week",
            PlanType::OneMonth => "1month",
            PlanType::ThreeMonths => "3months",
            PlanType::SixMonths => "6months",
            PlanType::OneYear => "1year",
        }
    }

    /// Human readable plan name
    pub fn label(&self) -> &'static str {
        match self {
            PlanType::OneDay => "1 Day",
            PlanType::OneWeek => "1 Week",
            PlanType::OneMonth => "1 Month",
            PlanType::ThreeMonths => "3 Months",
            PlanType::SixMonths => "6 Months",
            PlanType::OneYear => "1 Year",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PlanType {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        PlanType::ALL
            .into_iter()
            .find(|plan| plan.code() == code)
            .ok_or_else(|| Error::InvalidPlan(code.to_string()))
    }
}
