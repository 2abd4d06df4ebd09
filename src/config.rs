use chrono::Duration;
use clap::Args;

/// Runtime settings, read from the command line or the environment.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Path of the SQLite members database
    #[clap(long, env = "FRONTDESK_DB", default_value = "members.sqlite3")]
    pub members_db: String,

    /// Minutes a login stays valid
    #[clap(long, env = "FRONTDESK_SESSION_TTL", default_value_t = 720)]
    pub session_ttl_minutes: i64,

    /// Admin account created on a fresh database
    #[clap(long, env = "FRONTDESK_ADMIN_USER", default_value = "admin")]
    pub admin_username: String,

    #[clap(long, env = "FRONTDESK_ADMIN_PASSWORD", default_value = "admin123")]
    pub admin_password: String,

    /// Tracing filter directive, e.g. "info" or "frontdesk=debug"
    #[clap(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            members_db: "members.sqlite3".to_string(),
            session_ttl_minutes: 720,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes.max(0))
    }
}
