//! SQL construction for the patient table.

pub mod builder;

pub use builder::{quoted, PatientQueries, TableRef, ID_COLUMN};
