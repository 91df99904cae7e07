//! Patient CRUD routes. `/patients` and `/patients/` are served alike.

use crate::handlers::patients::{
    create_patient, delete_patient, list_patients, read_patient, update_patient,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/patients/", get(list_patients).post(create_patient))
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:patient_id",
            get(read_patient).patch(update_patient).delete(delete_patient),
        )
        .with_state(state)
}
