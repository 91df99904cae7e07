//! In-memory store and request helpers for driving the router without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use patient_records::{
    AppError, AppState, NewPatientRecord, PatientRecord, PatientRecordUpdate, PatientSession,
    PatientStore,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i64, PatientRecord>,
    last_id: i64,
}

/// Rows in a map; identifiers count up from 1 and are never reused.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Rows>>,
    open_sessions: Arc<AtomicUsize>,
    opened_total: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Sessions currently held by in-flight requests.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    pub fn opened_total(&self) -> usize {
        self.opened_total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn session(&self) -> Result<Box<dyn PatientSession>, AppError> {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        self.opened_total.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            rows: Arc::clone(&self.rows),
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

struct MemorySession {
    rows: Arc<Mutex<Rows>>,
    open_sessions: Arc<AtomicUsize>,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PatientSession for MemorySession {
    async fn insert(&mut self, patient: &NewPatientRecord) -> Result<PatientRecord, AppError> {
        let mut rows = self.rows.lock().unwrap();
        rows.last_id += 1;
        let record = patient.clone().into_record(rows.last_id);
        rows.by_id.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&mut self) -> Result<Vec<PatientRecord>, AppError> {
        Ok(self.rows.lock().unwrap().by_id.values().cloned().collect())
    }

    async fn get(&mut self, id: i64) -> Result<Option<PatientRecord>, AppError> {
        Ok(self.rows.lock().unwrap().by_id.get(&id).cloned())
    }

    async fn update(
        &mut self,
        id: i64,
        changes: &PatientRecordUpdate,
    ) -> Result<Option<PatientRecord>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.by_id.get_mut(&id).map(|record| {
            apply(changes, record);
            record.clone()
        }))
    }

    async fn delete(&mut self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().by_id.remove(&id).is_some())
    }
}

/// Overwrite the present fields of `record`, as the UPDATE statement would.
fn apply(changes: &PatientRecordUpdate, record: &mut PatientRecord) {
    let fields = [
        &mut record.firstname,
        &mut record.lastname,
        &mut record.middlename,
        &mut record.addressln1,
        &mut record.addressln2,
        &mut record.city,
        &mut record.state,
        &mut record.zip,
        &mut record.phone,
        &mut record.email,
    ];
    let present: std::collections::HashMap<_, _> = changes.changes().into_iter().collect();
    for (column, field) in patient_records::model::COLUMNS.iter().zip(fields) {
        if let Some(value) = present.get(column) {
            *field = (*value).to_string();
        }
    }
}

/// A store that cannot hand out sessions, as when the database is down.
pub struct DownStore;

#[async_trait]
impl PatientStore for DownStore {
    async fn session(&self) -> Result<Box<dyn PatientSession>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub const BODY_LIMIT: usize = 16 * 1024;

pub fn router(store: MemoryStore) -> Router {
    patient_records::app(AppState::new(store), BODY_LIMIT)
}

pub fn jane() -> Value {
    serde_json::json!({
        "firstname": "Jane",
        "lastname": "Doe",
        "middlename": "Q",
        "addressln1": "1 Main St",
        "addressln2": "",
        "city": "Springfield",
        "state": "IL",
        "zip": "62704",
        "phone": "555-0100",
        "email": "jane@example.com"
    })
}

/// Send one request; returns status and parsed JSON body (`Null` when empty or not JSON).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
