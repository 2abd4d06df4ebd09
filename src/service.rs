use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use frontdesk_data::{
    Admin, AdminAccount, AdminFilter, CreateMemberInput, Credentials, DashboardStats, Delete,
    Error, Insert, Member, MemberFilter, Query, Retrieve, Update, UpdateMemberInput,
};
use frontdesk_db::{schema, Connection};
use frontdesk_membership::{
    aggregate, compute_end_date, datetime::Clock, datetime::SystemClock, expiring_within,
    search,
};

use crate::{
    api::{Request, Response},
    auth::{self, Session},
    Config,
};

pub type ServiceResult<T> = Result<T, Error>;

/// Turn a store failure into the error reported to the caller.
/// Failures of the store itself are logged here.
fn store_error(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Error {
    move |err| {
        let err = Error::classify(err);
        if let Error::StoreUnavailable(reason) = &err {
            error!(operation, %reason, "store failure");
        }
        err
    }
}

/// The front desk operations, on top of one database handle.
#[derive(Debug, Clone)]
pub struct Service {
    db: Connection,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
    session: Arc<Mutex<Option<Session>>>,
}

impl Service {
    pub fn new(db: Connection, clock: Arc<dyn Clock>, session_ttl: Duration) -> Self {
        Self {
            db,
            clock,
            session_ttl,
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Open the configured database, install the schema and make
    /// sure there is an admin account to log in with.
    pub async fn connect(config: &Config) -> ServiceResult<Self> {
        let db = Connection::open(&config.members_db)
            .await
            .map_err(store_error("open"))?;
        schema::install(&db).await.map_err(store_error("install schema"))?;

        let service = Self::new(db, Arc::new(SystemClock), config.session_ttl());
        service
            .seed_admin(&config.admin_username, &config.admin_password)
            .await?;
        info!(members_db = %config.members_db, "front desk ready");
        Ok(service)
    }

    /// Create the initial admin account unless one exists already.
    pub async fn seed_admin(&self, username: &str, password: &str) -> ServiceResult<Option<Admin>> {
        let admins: Vec<AdminAccount> = self
            .db
            .query(&AdminFilter::default())
            .await
            .map_err(store_error("seed admin"))?;
        if !admins.is_empty() {
            return Ok(None);
        }
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("admin username and password are required"));
        }

        let account = self
            .db
            .insert(auth::new_account(username.trim(), password))
            .await
            .map_err(store_error("seed admin"))?;
        info!(username = %account.username, "created admin account");
        Ok(Some(Admin::from(&account)))
    }

    /// Check the credentials and start a session.
    /// Wrong credentials are not an error, there is just no admin.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> ServiceResult<Option<Admin>> {
        let account = self
            .db
            .find_by_credential(&credentials.username)
            .await
            .map_err(store_error("login"))?;

        let admin = match account {
            Some(account) if auth::verify_password(&credentials.password, &account) => {
                Admin::from(&account)
            }
            _ => {
                warn!("login failed");
                return Ok(None);
            }
        };

        *self.session.lock().await = Some(Session::start(admin.clone(), Utc::now()));
        info!("logged in");
        Ok(Some(admin))
    }

    pub async fn logout(&self) {
        if let Some(session) = self.session.lock().await.take() {
            info!(username = %session.admin.username, "logged out");
        }
    }

    /// Is somebody logged in right now?
    pub async fn check_auth(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.is_valid(Utc::now(), self.session_ttl))
            .unwrap_or(false)
    }

    /// All members, most recently created first
    pub async fn list_members(&self) -> ServiceResult<Vec<Member>> {
        let members: Vec<Member> = self
            .db
            .query(&MemberFilter::default())
            .await
            .map_err(store_error("list members"))?;
        Ok(members)
    }

    pub async fn get_member(&self, id: u32) -> ServiceResult<Option<Member>> {
        match self.db.retrieve(id).await.map_err(store_error("get member")) {
            Ok(member) => Ok(Some(member)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[instrument(skip_all)]
    pub async fn create_member(&self, input: CreateMemberInput) -> ServiceResult<Member> {
        let mut member = input.into_member()?;
        member.end_date = compute_end_date(member.join_date, member.plan)?;

        let member = self
            .db
            .insert(member)
            .await
            .map_err(store_error("create member"))?;
        info!(
            id = member.id,
            plan = %member.plan,
            end_date = %member.end_date,
            "member added"
        );
        Ok(member)
    }

    /// Apply partial changes. The end date is derived again when
    /// the plan or the join date changes, from the merged record.
    #[instrument(skip_all, fields(id = input.id))]
    pub async fn update_member(&self, input: UpdateMemberInput) -> ServiceResult<Member> {
        let member: Member = self
            .db
            .retrieve(input.id)
            .await
            .map_err(store_error("update member"))?;

        let mut update = input.apply(&member)?;
        if input.changes_term() {
            update.end_date = compute_end_date(update.join_date, update.plan)?;
        }
        if update == member {
            return Ok(member);
        }

        let update = self
            .db
            .update(update)
            .await
            .map_err(store_error("update member"))?;
        info!(end_date = %update.end_date, "member updated");
        Ok(update)
    }

    pub async fn delete_member(&self, id: u32) -> ServiceResult<()> {
        Delete::<Member>::delete(&self.db, id)
            .await
            .map_err(store_error("delete member"))?;
        info!(id, "member deleted");
        Ok(())
    }

    pub async fn search_members(&self, query: &str) -> ServiceResult<Vec<Member>> {
        let members = self.list_members().await?;
        Ok(search(&members, query))
    }

    /// Members whose plan ends within the next `days` days.
    pub async fn expiring_members(&self, days: u32) -> ServiceResult<Vec<Member>> {
        let members = self.list_members().await?;
        Ok(expiring_within(&members, self.clock.today(), days))
    }

    pub async fn dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        let members = self.list_members().await?;
        Ok(aggregate(&members, self.clock.today()))
    }

    /// Answer a request from the presentation layer.
    pub async fn dispatch(&self, request: Request) -> ServiceResult<Response> {
        let response = match request {
            Request::Login(credentials) => Response::Admin(self.login(&credentials).await?),
            Request::Logout => {
                self.logout().await;
                Response::Done { success: true }
            }
            Request::CheckAuth => Response::Authenticated(self.check_auth().await),
            Request::ListMembers => Response::Members(self.list_members().await?),
            Request::GetMember(id) => Response::Member(self.get_member(id).await?),
            Request::CreateMember(input) => {
                Response::Member(Some(self.create_member(input).await?))
            }
            Request::UpdateMember(input) => {
                Response::Member(Some(self.update_member(input).await?))
            }
            Request::DeleteMember(id) => {
                self.delete_member(id).await?;
                Response::Done { success: true }
            }
            Request::SearchMembers(query) => Response::Members(self.search_members(&query).await?),
            Request::ExpiringMembers(days) => {
                Response::Members(self.expiring_members(days).await?)
            }
            Request::GetDashboardStats => Response::Stats(self.dashboard_stats().await?),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use frontdesk_data::PlanType;
    use frontdesk_db::TestHandle;
    use frontdesk_membership::datetime::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 3, 10)
    }

    async fn open_service() -> (TestHandle, Service) {
        let (handle, db) = Connection::open_test().await;
        let service = Service::new(db, Arc::new(FixedClock(today())), Duration::hours(1));
        (handle, service)
    }

    fn input(name: &str, plan: &str, join_date: NaiveDate) -> CreateMemberInput {
        CreateMemberInput {
            name: name.to_string(),
            age: 28,
            address: "Gym Road 5".to_string(),
            dob: date(1996, 2, 29),
            plan: plan.to_string(),
            trainee: false,
            join_date,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_handle, service) = open_service().await;
        let member = service
            .create_member(input("Lena", "1month", date(2024, 1, 31)))
            .await
            .unwrap();
        assert_eq!(member.end_date, date(2024, 2, 29));

        let stored = service.get_member(member.id).await.unwrap().unwrap();
        assert_eq!(
            stored.end_date,
            compute_end_date(stored.join_date, stored.plan).unwrap()
        );
        assert_eq!(stored, member);
    }

    #[tokio::test]
    async fn test_get_missing_member_is_none() {
        let (_handle, service) = open_service().await;
        assert_eq!(service.get_member(77).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_plan_without_writing() {
        let (_handle, service) = open_service().await;
        let err = service
            .create_member(input("Lena", "2years", today()))
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidPlan("2years".to_string()));
        assert!(service.list_members().await.unwrap().is_empty());

        let err = service
            .create_member(input("", "1week", today()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert!(service.list_members().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_address_keeps_end_date() {
        let (_handle, service) = open_service().await;
        let member = service
            .create_member(input("Lena", "3months", date(2023, 11, 30)))
            .await
            .unwrap();

        let updated = service
            .update_member(UpdateMemberInput {
                id: member.id,
                address: Some("New Address 9".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.address, "New Address 9");
        assert_eq!(updated.end_date, member.end_date);
        assert_eq!(updated.end_date, date(2024, 2, 29));
    }

    #[tokio::test]
    async fn test_update_plan_recomputes_from_join_date() {
        let (_handle, service) = open_service().await;
        let member = service
            .create_member(input("Lena", "1week", date(2024, 2, 29)))
            .await
            .unwrap();
        assert_eq!(member.end_date, date(2024, 3, 7));

        let updated = service
            .update_member(UpdateMemberInput {
                id: member.id,
                plan: Some("1year".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.plan, PlanType::OneYear);
        assert_eq!(updated.join_date, date(2024, 2, 29));
        assert_eq!(updated.end_date, date(2025, 2, 28));

        let updated = service
            .update_member(UpdateMemberInput {
                id: member.id,
                join_date: Some(date(2023, 1, 31)),
                plan: Some("1month".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.end_date, date(2023, 2, 28));
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (_handle, service) = open_service().await;
        let err = service
            .update_member(UpdateMemberInput {
                id: 12,
                name: Some("Ghost".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, Error::NotFound);

        let member = service
            .create_member(input("Lena", "1day", today()))
            .await
            .unwrap();
        let err = service
            .update_member(UpdateMemberInput {
                id: member.id,
                plan: Some("weekly".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidPlan("weekly".to_string()));
        let stored = service.get_member(member.id).await.unwrap().unwrap();
        assert_eq!(stored.plan, PlanType::OneDay);
    }

    #[tokio::test]
    async fn test_update_without_changes() {
        let (_handle, service) = open_service().await;
        let member = service
            .create_member(input("Lena", "1day", today()))
            .await
            .unwrap();
        let same = service
            .update_member(UpdateMemberInput {
                id: member.id,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(same, member);
    }

    #[tokio::test]
    async fn test_delete_member() {
        let (_handle, service) = open_service().await;
        let member = service
            .create_member(input("Lena", "1day", today()))
            .await
            .unwrap();

        service.delete_member(member.id).await.unwrap();
        assert_eq!(service.get_member(member.id).await.unwrap(), None);
        assert_eq!(
            service.delete_member(member.id).await.unwrap_err(),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let (_handle, service) = open_service().await;
        for name in ["Anna Berg", "Bruno Roth", "Clara Bergmann"] {
            service
                .create_member(input(name, "1month", today()))
                .await
                .unwrap();
        }

        let names: Vec<String> = service
            .list_members()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Clara Bergmann", "Bruno Roth", "Anna Berg"]);

        let found = service.search_members("berg").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Clara Bergmann");
        assert_eq!(found[1].name, "Anna Berg");

        assert_eq!(service.search_members("").await.unwrap().len(), 3);
        assert!(service.search_members("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let (_handle, service) = open_service().await;
        assert_eq!(
            service.dashboard_stats().await.unwrap(),
            DashboardStats::default()
        );

        // One day plans joined so that {-1, 0, 3, 5, 6} days remain
        for (days_left, trainee) in [(-1, true), (0, false), (3, true), (5, false), (6, false)] {
            let join_date = today() + Duration::days(days_left - 1);
            let mut member = input("Member", "1day", join_date);
            member.trainee = trainee;
            service.create_member(member).await.unwrap();
        }

        let stats = service.dashboard_stats().await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_members: 5,
                active_trainers: 2,
                expiring_soon: 2,
            }
        );

        let expiring = service.expiring_members(5).await.unwrap();
        let left: Vec<i64> = expiring
            .iter()
            .map(|m| (m.end_date - today()).num_days())
            .collect();
        assert_eq!(left, vec![5, 3]);
    }

    #[tokio::test]
    async fn test_login_session() {
        let (_handle, service) = open_service().await;
        assert!(!service.check_auth().await);

        let admin = service.seed_admin("admin", "admin123").await.unwrap().unwrap();
        assert_eq!(admin.username, "admin");
        // Only seeded once
        assert_eq!(service.seed_admin("other", "pw").await.unwrap(), None);

        let wrong = Credentials {
            username: "admin".to_string(),
            password: "nope".to_string(),
        };
        assert_eq!(service.login(&wrong).await.unwrap(), None);
        assert!(!service.check_auth().await);

        let unknown = Credentials {
            username: "other".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(service.login(&unknown).await.unwrap(), None);

        let right = Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };
        assert_eq!(service.login(&right).await.unwrap(), Some(admin));
        assert!(service.check_auth().await);

        service.logout().await;
        assert!(!service.check_auth().await);
    }

    #[tokio::test]
    async fn test_session_expires() {
        let (_handle, db) = Connection::open_test().await;
        let service = Service::new(db, Arc::new(FixedClock(today())), Duration::zero());
        service.seed_admin("admin", "admin123").await.unwrap();

        let credentials = Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };
        assert!(service.login(&credentials).await.unwrap().is_some());
        assert!(!service.check_auth().await);
    }

    #[tokio::test]
    async fn test_connect_seeds_admin() {
        let (handle, _db) = Connection::open_test().await;
        let config = Config {
            members_db: handle.filename().to_string(),
            admin_username: "desk".to_string(),
            admin_password: "open sesame".to_string(),
            ..Config::default()
        };
        let service = Service::connect(&config).await.unwrap();

        let credentials = Credentials {
            username: "desk".to_string(),
            password: "open sesame".to_string(),
        };
        let admin = service.login(&credentials).await.unwrap().unwrap();
        assert_eq!(admin.username, "desk");
        assert!(service.check_auth().await);
    }

    #[tokio::test]
    async fn test_connect_store_unavailable() {
        let config = Config {
            members_db: "/nonexistent-frontdesk-dir/members.sqlite3".to_string(),
            ..Config::default()
        };
        let err = Service::connect(&config).await.unwrap_err();
        assert_eq!(err.kind(), "store_unavailable");
    }
}
