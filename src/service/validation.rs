//! Request validation against the declared patient shapes.
//!
//! Every problem in a body is collected before failing, so one 422 lists all missing or mistyped
//! fields.

use crate::error::{AppError, FieldError};
use crate::model::{NewPatientRecord, PatientRecordUpdate, COLUMNS};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a creation body: all content fields present and strings. Unknown keys are ignored.
    pub fn validate_create(body: Value) -> Result<NewPatientRecord, AppError> {
        let map = require_object(body)?;
        let mut errors = Vec::new();
        for col in COLUMNS {
            match map.get(col) {
                None => errors.push(FieldError::new(&["body", col], "missing", "Field required")),
                Some(v) => check_string(col, v, &mut errors),
            }
        }
        finish(errors, map)
    }

    /// Validate only the fields present in the body (for PATCH). Missing fields are not errors.
    pub fn validate_update(body: Value) -> Result<PatientRecordUpdate, AppError> {
        let map = require_object(body)?;
        let mut errors = Vec::new();
        for col in COLUMNS {
            if let Some(v) = map.get(col) {
                check_string(col, v, &mut errors);
            }
        }
        finish(errors, map)
    }
}

/// Parse a path identifier.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|_| {
        AppError::invalid(
            &["path", "patient_id"],
            "int_parsing",
            "Input should be a valid integer, unable to parse string as an integer",
        )
    })
}

fn require_object(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::invalid(
            &["body"],
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        )),
    }
}

fn check_string(col: &str, v: &Value, errors: &mut Vec<FieldError>) {
    if !v.is_string() {
        errors.push(FieldError::new(
            &["body", col],
            "string_type",
            "Input should be a valid string",
        ));
    }
}

fn finish<T: serde::de::DeserializeOwned>(
    errors: Vec<FieldError>,
    mut map: Map<String, Value>,
) -> Result<T, AppError> {
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    map.retain(|k, _| COLUMNS.contains(&k.as_str()));
    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::invalid(&["body"], "value_error", e.to_string()))
}
