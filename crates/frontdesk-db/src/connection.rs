use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::schema;

/// A thread safe connection to the database.
///
/// Cloning the handle shares the underlying connection.
#[derive(Debug, Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Open a connection to the database, creating the file
    /// if it does not exist yet.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(filename)
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        debug!(filename, "opened database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Acquire exclusive use of the connection.
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Open a new test database connection.
    /// The database will be created on each open.
    pub async fn open_test() -> (TestHandle, Connection) {
        let filename = std::env::temp_dir()
            .join(format!("frontdesk_test_{}.sqlite3", rand::random::<u64>()))
            .to_string_lossy()
            .into_owned();
        let handle = TestHandle {
            filename: filename.clone(),
        };

        let conn = Connection::open(&filename).await.unwrap();

        // Install the schema
        schema::install(&conn).await.unwrap();

        (handle, conn)
    }
}

/// Removes the test database file once dropped.
pub struct TestHandle {
    filename: String,
}

impl TestHandle {
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            if let Err(err) = fs::remove_file(path) {
                warn!(filename = %self.filename, error = %err, "could not remove test database");
            }
        }
    }
}
