//! Admin Model
//!
//! Dashboard principals. Passwords are argon2-hashed. The record round-trips
//! to storage with the hash; API responses use [`AdminInfo`], which never
//! carries it.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type AdminId = Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<AdminId>,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// What the dashboard sees about a principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            email: admin.email.clone(),
        }
    }
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = Admin::hash_password("hunter2-but-longer").unwrap();
        let admin = Admin {
            id: None,
            email: "admin@example.org".to_string(),
            password_hash: hash,
            created_at: 0,
            updated_at: 0,
        };
        assert!(admin.verify_password("hunter2-but-longer").unwrap());
        assert!(!admin.verify_password("wrong").unwrap());
    }
}
