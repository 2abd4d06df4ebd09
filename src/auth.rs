use chrono::{DateTime, Duration, Utc};
use sha2::Sha256;

use frontdesk_data::{Admin, AdminAccount};

const PBKDF2_ROUNDS: u32 = 10_000;

/// hash_password derives a 32 byte key from the password with
/// pbkdf2 hmac sha256, using the salt, and returns its hexdigest.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut key);
    hex::encode(key)
}

/// A fresh random salt, hex encoded.
pub fn new_salt() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// Build an unsaved admin account with a salted password hash.
pub fn new_account(username: &str, password: &str) -> AdminAccount {
    let salt = new_salt();
    AdminAccount {
        username: username.to_string(),
        password_hash: hash_password(password, &salt),
        salt,
        ..AdminAccount::default()
    }
}

pub fn verify_password(password: &str, account: &AdminAccount) -> bool {
    hash_password(password, &account.salt) == account.password_hash
}

/// The operator currently logged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub admin: Admin,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn start(admin: Admin, now: DateTime<Utc>) -> Self {
        Self {
            admin,
            started_at: now,
        }
    }

    /// A session is valid for `ttl` after it started.
    pub fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.started_at && now - self.started_at < ttl
    }
}
