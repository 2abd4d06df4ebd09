use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, PlanType};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub trainee: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub address: String,
    pub dob: NaiveDate,
    pub plan: PlanType,
    pub trainee: bool,
    pub join_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for registering a new member. The id and the end
/// date are assigned later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberInput {
    pub name: String,
    pub age: u32,
    pub address: String,
    pub dob: NaiveDate,
    pub plan: String,
    pub trainee: bool,
    pub join_date: NaiveDate,
}

/// Partial changes to an existing member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberInput {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub trainee: Option<bool>,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}

fn require_text(field: &str, value: &str) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

fn require_age(age: u32) -> Result<u32, Error> {
    if age == 0 {
        return Err(Error::validation("age must be a positive number"));
    }
    Ok(age)
}

impl Member {
    /// Check the invariants every stored member must satisfy.
    /// The end date is not checked here, it is derived.
    pub fn validate(&self) -> Result<(), Error> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)?;
        require_age(self.age)?;
        if self.dob > self.join_date {
            return Err(Error::validation("date of birth is after the join date"));
        }
        Ok(())
    }
}

impl CreateMemberInput {
    /// Validate the input and turn it into an unsaved member.
    /// The end date is left at the join date for the caller to derive.
    pub fn into_member(self) -> Result<Member, Error> {
        let plan: PlanType = self.plan.parse()?;
        let member = Member {
            name: require_text("name", &self.name)?,
            age: require_age(self.age)?,
            address: require_text("address", &self.address)?,
            dob: self.dob,
            plan,
            trainee: self.trainee,
            join_date: self.join_date,
            end_date: self.join_date,
            ..Member::default()
        };
        member.validate()?;
        Ok(member)
    }
}

impl UpdateMemberInput {
    /// True if the input carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.address.is_none()
            && self.dob.is_none()
            && self.plan.is_none()
            && self.trainee.is_none()
            && self.join_date.is_none()
    }

    /// Does this change require the end date to be derived again?
    pub fn changes_term(&self) -> bool {
        self.plan.is_some() || self.join_date.is_some()
    }

    /// Apply the changes on top of an existing member.
    pub fn apply(&self, member: &Member) -> Result<Member, Error> {
        let mut update = member.clone();

        if let Some(plan) = &self.plan {
            update.plan = plan.parse()?;
        }
        if let Some(name) = &self.name {
            update.name = require_text("name", name)?;
        }
        if let Some(age) = self.age {
            update.age = require_age(age)?;
        }
        if let Some(address) = &self.address {
            update.address = require_text("address", address)?;
        }
        if let Some(dob) = self.dob {
            update.dob = dob;
        }
        if let Some(trainee) = self.trainee {
            update.trainee = trainee;
        }
        if let Some(join_date) = self.join_date {
            update.join_date = join_date;
        }

        update.validate()?;
        Ok(update)
    }
}
