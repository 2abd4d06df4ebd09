use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use frontdesk_data::{AdminAccount, AdminFilter, Error, Insert, Query};

use crate::{results::Id, Connection};

#[async_trait]
impl Query<AdminAccount> for Connection {
    type Filter = AdminFilter;

    /// Fetch admin accounts
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<AdminAccount>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                username,
                password_hash,
                salt,
                created_at
            FROM admins
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(username) = filter.username.clone() {
            qry.push(" AND username = ").push_bind(username);
        }
        qry.push(" ORDER BY id");

        let admins: Vec<AdminAccount> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(admins)
    }
}

#[async_trait]
impl Insert<AdminAccount> for Connection {
    /// Create admin account
    async fn insert(&self, admin: AdminAccount) -> Result<AdminAccount> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO admins (
                    username,
                    password_hash,
                    salt,
                    created_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&admin.username)
                .push_bind(&admin.password_hash)
                .push_bind(&admin.salt)
                .push_bind(Utc::now());

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        let filter = AdminFilter {
            id: Some(insert.id),
            ..Default::default()
        };
        let mut admins: Vec<AdminAccount> = self.query(&filter).await?;
        let admin = admins.pop().ok_or(Error::NotFound)?;
        Ok(admin)
    }
}

impl Connection {
    /// Look up the admin account for a username.
    pub async fn find_by_credential(&self, username: &str) -> Result<Option<AdminAccount>> {
        let filter = AdminFilter {
            username: Some(username.to_string()),
            ..Default::default()
        };
        let mut admins: Vec<AdminAccount> = self.query(&filter).await?;
        if admins.len() > 1 {
            return Err(Error::Ambiguous(admins.len()).into());
        }
        Ok(admins.pop())
    }
}
