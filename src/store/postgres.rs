//! PostgreSQL store. A session owns one pooled connection for the whole request; dropping the
//! session hands the connection back to the pool.

use super::{PatientSession, PatientStore};
use crate::error::AppError;
use crate::model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
use crate::sql::{PatientQueries, TableRef};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    queries: Arc<PatientQueries>,
}

impl PgStore {
    pub fn new(pool: PgPool, table: TableRef) -> Self {
        PgStore {
            pool,
            queries: Arc::new(PatientQueries::new(table)),
        }
    }
}

#[async_trait]
impl PatientStore for PgStore {
    async fn session(&self) -> Result<Box<dyn PatientSession>, AppError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgSession {
            conn,
            queries: Arc::clone(&self.queries),
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

pub struct PgSession {
    conn: PoolConnection<Postgres>,
    queries: Arc<PatientQueries>,
}

#[async_trait]
impl PatientSession for PgSession {
    async fn insert(&mut self, patient: &NewPatientRecord) -> Result<PatientRecord, AppError> {
        let sql = &self.queries.insert;
        tracing::debug!(sql = %sql, "query");
        let mut query = sqlx::query_as::<_, PatientRecord>(sql);
        for v in patient.values() {
            query = query.bind(v);
        }
        Ok(query.fetch_one(&mut *self.conn).await?)
    }

    async fn list(&mut self) -> Result<Vec<PatientRecord>, AppError> {
        let sql = &self.queries.select_all;
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, PatientRecord>(sql)
            .fetch_all(&mut *self.conn)
            .await?)
    }

    async fn get(&mut self, id: i64) -> Result<Option<PatientRecord>, AppError> {
        let sql = &self.queries.select_by_id;
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, PatientRecord>(sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?)
    }

    async fn update(
        &mut self,
        id: i64,
        changes: &PatientRecordUpdate,
    ) -> Result<Option<PatientRecord>, AppError> {
        let Some(sql) = self.queries.update(changes) else {
            return self.get(id).await;
        };
        tracing::debug!(sql = %sql, id, "query");
        let mut query = sqlx::query_as::<_, PatientRecord>(&sql);
        for (_, v) in changes.changes() {
            query = query.bind(v);
        }
        Ok(query.bind(id).fetch_optional(&mut *self.conn).await?)
    }

    async fn delete(&mut self, id: i64) -> Result<bool, AppError> {
        let sql = &self.queries.delete;
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&mut *self.conn).await?;
        Ok(result.rows_affected() > 0)
    }
}
