//! PostgreSQL audit store.

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::NoTls;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditStore};
use crate::config::DatabaseConfig;
use crate::error::AuditStoreError;

/// Append-only Postgres store for audit entries.
///
/// Scalar columns cover the quantities support staff query on; the full
/// snapshot lives in a jsonb payload column and is the authoritative record.
pub struct PgAuditStore {
    pool: Pool,
}

impl PgAuditStore {
    /// Create the store and verify connectivity.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AuditStoreError> {
        let mut cfg = Config::new();
        cfg.url = Some(config.url().to_string());
        cfg.pool = Some(deadpool_postgres::PoolConfig {
            max_size: config.pool_size,
            ..Default::default()
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| AuditStoreError::Pool(e.to_string()))?;

        // Test connection
        let _ = pool.get().await?;

        Ok(Self { pool })
    }

    /// Apply the audit schema. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> Result<(), AuditStoreError> {
        let conn = self.conn().await?;
        conn.batch_execute(include_str!(
            "../../migrations/V1__create_price_audit_entries.sql"
        ))
        .await?;
        Ok(())
    }

    async fn conn(&self) -> Result<deadpool_postgres::Object, AuditStoreError> {
        Ok(self.pool.get().await?)
    }

    /// Get a clone of the database pool.
    pub fn pool(&self) -> Pool {
        self.pool.clone()
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn append(&self, entry: &AuditEntry) -> Result<Uuid, AuditStoreError> {
        let conn = self.conn().await?;
        let payload = serde_json::to_value(entry)?;

        conn.execute(
            "INSERT INTO price_audit_entries \
             (id, actor, scope_id, recorded_at, reference_time, twu, mp, bpv, payload) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            &[
                &entry.id,
                &entry.actor,
                &entry.scope_id,
                &entry.recorded_at,
                &entry.reference_time,
                &entry.twu,
                &entry.mp,
                &entry.bpv,
                &payload,
            ],
        )
        .await?;

        Ok(entry.id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AuditEntry>, AuditStoreError> {
        let conn = self.conn().await?;
        let row = conn
            .query_opt(
                "SELECT payload FROM price_audit_entries WHERE id = $1",
                &[&id],
            )
            .await?;

        match row {
            Some(row) => {
                let payload: serde_json::Value = row.get(0);
                Ok(Some(serde_json::from_value(payload)?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_scope(&self, scope_id: Uuid) -> Result<Vec<AuditEntry>, AuditStoreError> {
        let conn = self.conn().await?;
        let rows = conn
            .query(
                "SELECT payload FROM price_audit_entries \
                 WHERE scope_id = $1 ORDER BY recorded_at",
                &[&scope_id],
            )
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: serde_json::Value = row.get(0);
            entries.push(serde_json::from_value(payload)?);
        }
        Ok(entries)
    }
}
