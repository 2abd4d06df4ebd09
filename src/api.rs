//! Requests and responses exchanged with the presentation layer.
//!
//! Requests are tagged with the channel name the desktop front end
//! uses, e.g. `{"channel": "members:get", "payload": 4}`.

use serde::{Deserialize, Serialize};

use frontdesk_data::{
    Admin, CreateMemberInput, Credentials, DashboardStats, Error, Member, UpdateMemberInput,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload")]
pub enum Request {
    #[serde(rename = "auth:login")]
    Login(Credentials),
    #[serde(rename = "auth:logout")]
    Logout,
    #[serde(rename = "auth:check")]
    CheckAuth,
    #[serde(rename = "members:getAll")]
    ListMembers,
    #[serde(rename = "members:get")]
    GetMember(u32),
    #[serde(rename = "members:create")]
    CreateMember(CreateMemberInput),
    #[serde(rename = "members:update")]
    UpdateMember(UpdateMemberInput),
    #[serde(rename = "members:delete")]
    DeleteMember(u32),
    #[serde(rename = "members:search")]
    SearchMembers(String),
    #[serde(rename = "members:expiring")]
    ExpiringMembers(u32),
    #[serde(rename = "dashboard:getStats")]
    GetDashboardStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Admin(Option<Admin>),
    Authenticated(bool),
    Members(Vec<Member>),
    Member(Option<Member>),
    Done { success: bool },
    Stats(DashboardStats),
}

/// A failed request, as reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
