//! Patient CRUD handlers: create, list, read, update, delete.
//!
//! Each handler validates the path and body first, then opens its [`DbSession`] and makes one
//! call into [`PatientService`].

use crate::error::{AppError, ErrorBody};
use crate::extractors::{DbSession, JsonBody};
use crate::model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
use crate::response::{ack, created, ok, Ack};
use crate::service::{parse_id, PatientService, RequestValidator};
use axum::{extract::Path, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/patients/",
    tag = "patients",
    request_body = NewPatientRecord,
    responses(
        (status = 201, description = "Stored record with assigned id", body = PatientRecord),
        (status = 422, description = "Missing or mistyped field", body = ErrorBody),
    )
)]
pub async fn create_patient(
    mut db: DbSession,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let patient = RequestValidator::validate_create(body)?;
    let record = PatientService::create(db.open().await?, &patient).await?;
    tracing::info!(id = record.id, "patient created");
    Ok(created(record))
}

#[utoipa::path(
    get,
    path = "/patients/",
    tag = "patients",
    responses((status = 200, description = "Every record, ascending by id", body = [PatientRecord]))
)]
pub async fn list_patients(mut db: DbSession) -> Result<impl IntoResponse, AppError> {
    let records = PatientService::list(db.open().await?).await?;
    Ok(ok(records))
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}",
    tag = "patients",
    params(("patient_id" = i64, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The record", body = PatientRecord),
        (status = 404, description = "Patient not found", body = ErrorBody),
        (status = 422, description = "Identifier is not an integer", body = ErrorBody),
    )
)]
pub async fn read_patient(
    Path(id_str): Path<String>,
    mut db: DbSession,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let record = PatientService::read(db.open().await?, id).await?;
    Ok(ok(record))
}

#[utoipa::path(
    patch,
    path = "/patients/{patient_id}",
    tag = "patients",
    params(("patient_id" = i64, Path, description = "Patient identifier")),
    request_body = PatientRecordUpdate,
    responses(
        (status = 200, description = "The updated record", body = PatientRecord),
        (status = 404, description = "Patient not found", body = ErrorBody),
        (status = 422, description = "Mistyped field or identifier", body = ErrorBody),
    )
)]
pub async fn update_patient(
    Path(id_str): Path<String>,
    mut db: DbSession,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let changes = RequestValidator::validate_update(body)?;
    let record = PatientService::update(db.open().await?, id, &changes).await?;
    tracing::info!(id, fields = changes.changes().len(), "patient updated");
    Ok(ok(record))
}

#[utoipa::path(
    delete,
    path = "/patients/{patient_id}",
    tag = "patients",
    params(("patient_id" = i64, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Deleted", body = Ack),
        (status = 404, description = "Patient not found", body = ErrorBody),
        (status = 422, description = "Identifier is not an integer", body = ErrorBody),
    )
)]
pub async fn delete_patient(
    Path(id_str): Path<String>,
    mut db: DbSession,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    PatientService::delete(db.open().await?, id).await?;
    tracing::info!(id, "patient deleted");
    Ok(ack())
}
