use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use frontdesk_data::{Delete, Error, Insert, Member, MemberFilter, Query, Retrieve, Update};

use crate::{results::Id, Connection};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;

    /// Fetch members, most recently created first
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                age,
                address,
                dob,
                plan,
                trainee,
                join_date,
                end_date,
                created_at,
                updated_at
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(address) = filter.address.clone() {
            qry.push(" AND address LIKE ").push_bind(format!("%{}%", address));
        }
        if let Some(trainee) = filter.trainee {
            qry.push(" AND trainee = ").push_bind(trainee);
        }
        qry.push(" ORDER BY created_at DESC, id DESC");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        debug!(count = members.len(), ?filter, "queried members");
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;

    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let mut members: Vec<Member> = self.query(&filter).await?;
        let member = members.pop().ok_or(Error::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    /// Create member. The id and timestamps are assigned here.
    async fn insert(&self, member: Member) -> Result<Member> {
        let now = Utc::now();
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    name,
                    age,
                    address,
                    dob,
                    plan,
                    trainee,
                    join_date,
                    end_date,
                    created_at,
                    updated_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.name)
                .push_bind(member.age)
                .push_bind(&member.address)
                .push_bind(member.dob)
                .push_bind(member.plan)
                .push_bind(member.trainee)
                .push_bind(member.join_date)
                .push_bind(member.end_date)
                .push_bind(now)
                .push_bind(now);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            let result = QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", age = ")
                .push_bind(member.age)
                .push(", address = ")
                .push_bind(&member.address)
                .push(", dob = ")
                .push_bind(member.dob)
                .push(", plan = ")
                .push_bind(member.plan)
                .push(", trainee = ")
                .push_bind(member.trainee)
                .push(", join_date = ")
                .push_bind(member.join_date)
                .push(", end_date = ")
                .push_bind(member.end_date)
                .push(", updated_at = ")
                .push_bind(Utc::now())
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(Error::NotFound.into());
            }
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    type Key = u32;

    /// Delete member
    async fn delete(&self, member_id: Self::Key) -> Result<()> {
        let mut conn = self.lock().await;
        let result = QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member_id)
            .build()
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound.into());
        }
        Ok(())
    }
}
