use crate::adapters::database::DbPool;
use crate::domain::honeypot::HoneypotLogEntry;
use crate::services::bot_log::{HoneypotLogStore, StoreError};
use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct HoneypotLogRepository {
    pool: DbPool,
}

impl HoneypotLogRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HoneypotLogStore for HoneypotLogRepository {
    #[tracing::instrument(level = "debug", skip_all, err)]
    async fn append(&self, entry: &HoneypotLogEntry) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO honeypot_logs (id, ip_address, user_agent, payload)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(Uuid::now_v7())
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(Json(&entry.payload))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
