//! Patient records: a CRUD REST service over one PostgreSQL table of patient contact records.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, FieldError};
pub use migration::{ensure_database_exists, ensure_patient_table};
pub use model::{NewPatientRecord, PatientRecord, PatientRecordUpdate};
pub use routes::{common_routes_with_ready, openapi_routes, patient_routes, ApiDoc};
pub use service::PatientService;
pub use sql::TableRef;
pub use state::AppState;
pub use store::{PatientSession, PatientStore, PgStore};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router: patient CRUD, common routes, OpenAPI document, request tracing and
/// a body size limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(openapi_routes())
        .merge(patient_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
