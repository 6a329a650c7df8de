//! Admin Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Admin;
use crate::utils::now_millis;

const TABLE: &str = "admin";

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Admin>> {
        let admins: Vec<Admin> = self
            .base
            .db()
            .query("SELECT * FROM admin WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(admins.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Admin>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, email: String, password: &str) -> RepoResult<Admin> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Admin '{email}' already exists")));
        }
        let password_hash = Admin::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
        let now = now_millis();
        self.base
            .create(
                TABLE,
                Admin { id: None, email, password_hash, created_at: now, updated_at: now },
            )
            .await
    }

    /// Create the bootstrap principal if the table is empty. Called at
    /// startup when `ADMIN_EMAIL` / `ADMIN_PASSWORD` are configured.
    pub async fn ensure_seed(&self, email: &str, password: &str) -> RepoResult<()> {
        let mut response = self
            .base
            .db()
            .query("SELECT count() FROM admin GROUP ALL")
            .await?;
        let count: Option<i64> = response.take((0, "count"))?;
        if count.unwrap_or(0) == 0 {
            self.create(email.to_string(), password).await?;
            tracing::info!(email = %email, "Seeded bootstrap admin account");
        }
        Ok(())
    }
}
