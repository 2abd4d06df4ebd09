use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AdminFilter {
    pub id: Option<u32>,
    pub username: Option<String>,
}

/// A stored operator account.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct AdminAccount {
    pub id: u32,
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
}

/// The part of an admin account that leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: u32,
    pub username: String,
}

impl From<&AdminAccount> for Admin {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
