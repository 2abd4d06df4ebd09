use anyhow::Result;
use tracing::info;

use crate::Connection;

const SCHEMA: &str = include_str!("../db/schema.sql");

/// Install the database schema.
/// Existing tables are left untouched.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    sqlx::raw_sql(SCHEMA).execute(&mut *conn).await?;
    info!("database schema installed");
    Ok(())
}
