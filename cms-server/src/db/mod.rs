//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB under the work directory in
//! production, the in-memory engine for tests.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use crate::utils::AppError;

const NAMESPACE: &str = "cms";
const DATABASE: &str = "content";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `work_dir/database`.
    pub async fn new(work_dir: &str) -> Result<Self, AppError> {
        let dir = format!("{work_dir}/database");
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::database(format!("Failed to create database dir: {e}")))?;

        let path = format!("{dir}/cms.db");
        let db = Surreal::new::<Mem>(()) // DIAGNOSTIC TEMP
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path, "Database connection established");
        Ok(Self { db })
    }

    /// In-memory database for tests.
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_on_disk_database_in_fresh_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let service = DbService::new(dir.path().to_str().unwrap()).await.unwrap();
        service
            .db
            .query("CREATE probe SET ok = true")
            .await
            .unwrap()
            .check()
            .unwrap();
    }
}
