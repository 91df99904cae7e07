//! OpenAPI document generated from the handler annotations and model schemas.

use crate::error::{ErrorBody, ErrorDetail, FieldError};
use crate::model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
use crate::response::Ack;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Patient Records", description = "CRUD API over patient contact records"),
    paths(
        crate::handlers::patients::create_patient,
        crate::handlers::patients::list_patients,
        crate::handlers::patients::read_patient,
        crate::handlers::patients::update_patient,
        crate::handlers::patients::delete_patient,
    ),
    components(schemas(
        PatientRecord,
        NewPatientRecord,
        PatientRecordUpdate,
        Ack,
        ErrorBody,
        ErrorDetail,
        FieldError
    )),
    tags((name = "patients", description = "Patient contact records"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /openapi.json
pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
