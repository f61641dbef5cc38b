use crate::entities::{HistoryActiveModel, HistoryColumn, HistoryEntity, HistoryModel};
use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
};
use tracing::debug;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS migrations (
    name VARCHAR(255) NOT NULL PRIMARY KEY,
    date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Persisted log of applied migration names.
pub struct HistoryRepository {
    db: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub async fn ensure_table(&self) -> Result<()> {
        self.db
            .execute_unprepared(CREATE_TABLE_SQL)
            .await
            .context("Failed to create migrations history table")?;
        Ok(())
    }

    /// Applied timeline, oldest first.
    pub async fn get_all(&self) -> Result<Vec<HistoryModel>> {
        HistoryEntity::find()
            .order_by_asc(HistoryColumn::Date)
            .order_by_asc(HistoryColumn::Name)
            .all(&self.db)
            .await
            .context("Failed to read migrations history")
    }

    /// Row with the greatest name. Ordering is by name, not by `date`.
    pub async fn find_latest(&self) -> Result<Option<HistoryModel>> {
        HistoryEntity::find()
            .order_by_desc(HistoryColumn::Name)
            .limit(1)
            .one(&self.db)
            .await
            .context("Failed to read latest migrations history row")
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<HistoryModel>> {
        HistoryEntity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .context(format!("Failed to find history row '{}'", name))
    }

    pub async fn insert(&self, name: &str) -> Result<()> {
        debug!("Inserting history row '{}'", name);
        let active_model = HistoryActiveModel {
            name: Set(name.to_string()),
            date: Set(Utc::now().naive_utc()),
        };

        HistoryEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .context(format!("Failed to insert history row '{}'", name))?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<u64> {
        debug!("Deleting history row '{}'", name);
        let res = HistoryEntity::delete_by_id(name.to_string())
            .exec(&self.db)
            .await
            .context(format!("Failed to delete history row '{}'", name))?;
        Ok(res.rows_affected)
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let res = HistoryEntity::delete_many()
            .exec(&self.db)
            .await
            .context("Failed to clear migrations history")?;
        Ok(res.rows_affected)
    }
}
