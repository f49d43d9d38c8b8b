//! SQL implementation of the professional repository

use crate::error::DbError;
use crate::repositories::professional::ProfessionalRepository;
use crate::repositories::schema;
use crate::DbClient;
use chrono::Utc;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct SqlProfessionalRepository {
    db_client: DbClient,
}

impl SqlProfessionalRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl ProfessionalRepository for SqlProfessionalRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        schema::ensure_schema(&self.db_client).await
    }

    async fn register_professional(&self, professional_id: &str) -> Result<(), DbError> {
        debug!("Registering professional {}", professional_id);

        let _gate = self.db_client.write_lock().await;
        sqlx::query(
            "INSERT INTO professionals (id, created_at) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
        )
        .bind(professional_id)
        .bind(Utc::now().timestamp_micros())
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to register professional {}: {}", professional_id, e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(())
    }

    async fn professional_exists(&self, professional_id: &str) -> Result<bool, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM professionals WHERE id = $1")
            .bind(professional_id)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn list_professionals(&self) -> Result<Vec<String>, DbError> {
        sqlx::query_scalar("SELECT id FROM professionals ORDER BY id")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))
    }
}
