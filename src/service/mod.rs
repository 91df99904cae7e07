//! Record store access and request validation.

pub mod patients;
pub mod validation;

pub use patients::PatientService;
pub use validation::{parse_id, RequestValidator};
