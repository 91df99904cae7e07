//! The five patient operations over a request-scoped session.

use crate::error::AppError;
use crate::model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
use crate::store::PatientSession;

pub struct PatientService;

impl PatientService {
    /// Insert one row. No duplicate detection.
    pub async fn create(
        session: &mut dyn PatientSession,
        patient: &NewPatientRecord,
    ) -> Result<PatientRecord, AppError> {
        session.insert(patient).await
    }

    /// All rows, ascending by id.
    pub async fn list(session: &mut dyn PatientSession) -> Result<Vec<PatientRecord>, AppError> {
        session.list().await
    }

    /// Fetch one row or fail with `PatientNotFound`. Every keyed operation starts here.
    pub async fn fetch(session: &mut dyn PatientSession, id: i64) -> Result<PatientRecord, AppError> {
        session
            .get(id)
            .await?
            .ok_or(AppError::PatientNotFound { id })
    }

    pub async fn read(session: &mut dyn PatientSession, id: i64) -> Result<PatientRecord, AppError> {
        Self::fetch(session, id).await
    }

    /// Overwrite the present fields. An empty update writes nothing and returns the stored row.
    pub async fn update(
        session: &mut dyn PatientSession,
        id: i64,
        changes: &PatientRecordUpdate,
    ) -> Result<PatientRecord, AppError> {
        let current = Self::fetch(session, id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        session
            .update(id, changes)
            .await?
            .ok_or(AppError::PatientNotFound { id })
    }

    /// Hard delete.
    pub async fn delete(session: &mut dyn PatientSession, id: i64) -> Result<(), AppError> {
        Self::fetch(session, id).await?;
        if session.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::PatientNotFound { id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Finds the row on lookup but loses it before the write, as a concurrent DELETE would.
    struct VanishingSession {
        row: PatientRecord,
        writes: usize,
    }

    #[async_trait]
    impl PatientSession for VanishingSession {
        async fn insert(&mut self, patient: &NewPatientRecord) -> Result<PatientRecord, AppError> {
            Ok(patient.clone().into_record(self.row.id))
        }

        async fn list(&mut self) -> Result<Vec<PatientRecord>, AppError> {
            Ok(vec![self.row.clone()])
        }

        async fn get(&mut self, id: i64) -> Result<Option<PatientRecord>, AppError> {
            Ok((id == self.row.id).then(|| self.row.clone()))
        }

        async fn update(
            &mut self,
            _id: i64,
            _changes: &PatientRecordUpdate,
        ) -> Result<Option<PatientRecord>, AppError> {
            self.writes += 1;
            Ok(None)
        }

        async fn delete(&mut self, _id: i64) -> Result<bool, AppError> {
            self.writes += 1;
            Ok(false)
        }
    }

    fn session() -> VanishingSession {
        let row = NewPatientRecord {
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            middlename: "Q".into(),
            addressln1: "1 Main St".into(),
            addressln2: String::new(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62704".into(),
            phone: "555-0100".into(),
            email: "jane@example.com".into(),
        }
        .into_record(7);
        VanishingSession { row, writes: 0 }
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let mut s = session();
        let err = PatientService::fetch(&mut s, 8).await.unwrap_err();
        assert!(matches!(err, AppError::PatientNotFound { id: 8 }));
    }

    #[tokio::test]
    async fn empty_update_skips_the_write() {
        let mut s = session();
        let row = PatientService::update(&mut s, 7, &PatientRecordUpdate::default())
            .await
            .unwrap();
        assert_eq!(row, s.row);
        assert_eq!(s.writes, 0);
    }

    #[tokio::test]
    async fn row_lost_between_lookup_and_write_is_not_found() {
        let mut s = session();
        let changes = PatientRecordUpdate {
            city: Some("Chicago".into()),
            ..Default::default()
        };
        let err = PatientService::update(&mut s, 7, &changes).await.unwrap_err();
        assert!(matches!(err, AppError::PatientNotFound { id: 7 }));
        let err = PatientService::delete(&mut s, 7).await.unwrap_err();
        assert!(matches!(err, AppError::PatientNotFound { id: 7 }));
        assert_eq!(s.writes, 2);
    }

    #[tokio::test]
    async fn missing_row_is_never_written() {
        let mut s = session();
        let changes = PatientRecordUpdate {
            city: Some("Chicago".into()),
            ..Default::default()
        };
        assert!(PatientService::update(&mut s, 99, &changes).await.is_err());
        assert!(PatientService::delete(&mut s, 99).await.is_err());
        assert_eq!(s.writes, 0);
    }
}
