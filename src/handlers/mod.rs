//! HTTP handlers for patient records.

pub mod patients;
pub use patients::*;
