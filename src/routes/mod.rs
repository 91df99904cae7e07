//! Route tables.

pub mod common;
pub mod openapi;
pub mod patients;

pub use common::common_routes_with_ready;
pub use openapi::{openapi_routes, ApiDoc};
pub use patients::patient_routes;
