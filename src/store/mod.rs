//! Storage seam. A [`PatientStore`] hands out one [`PatientSession`] per request; the session is
//! released when dropped, whichever way the request ends.

pub mod postgres;

pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
use async_trait::async_trait;

#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Open a request-scoped session.
    async fn session(&self) -> Result<Box<dyn PatientSession>, AppError>;

    /// Connectivity check behind `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Single-row operations against the patient table. Each call is one round-trip.
#[async_trait]
pub trait PatientSession: Send {
    /// Insert a row; the store assigns `id`.
    async fn insert(&mut self, patient: &NewPatientRecord) -> Result<PatientRecord, AppError>;

    /// Every row, ascending by `id`.
    async fn list(&mut self) -> Result<Vec<PatientRecord>, AppError>;

    async fn get(&mut self, id: i64) -> Result<Option<PatientRecord>, AppError>;

    /// Overwrite only the present fields. `None` when no row has `id`.
    async fn update(
        &mut self,
        id: i64,
        changes: &PatientRecordUpdate,
    ) -> Result<Option<PatientRecord>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&mut self, id: i64) -> Result<bool, AppError>;
}
