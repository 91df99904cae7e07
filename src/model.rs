//! Patient record shapes: stored row, creation payload, partial update.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Content columns in table order. The identifier column is `id`.
pub const COLUMNS: [&str; 10] = [
    "firstname",
    "lastname",
    "middlename",
    "addressln1",
    "addressln2",
    "city",
    "state",
    "zip",
    "phone",
    "email",
];

/// A stored patient row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PatientRecord {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub addressln1: String,
    pub addressln2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

/// Creation payload: every content field, no identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewPatientRecord {
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub addressln1: String,
    pub addressln2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl NewPatientRecord {
    /// Values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 10] {
        [
            self.firstname.as_str(),
            self.lastname.as_str(),
            self.middlename.as_str(),
            self.addressln1.as_str(),
            self.addressln2.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zip.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
        ]
    }

    /// The stored row this payload becomes once the store assigns `id`.
    pub fn into_record(self, id: i64) -> PatientRecord {
        PatientRecord {
            id,
            firstname: self.firstname,
            lastname: self.lastname,
            middlename: self.middlename,
            addressln1: self.addressln1,
            addressln2: self.addressln2,
            city: self.city,
            state: self.state,
            zip: self.zip,
            phone: self.phone,
            email: self.email,
        }
    }
}

/// Partial update. `None` means the key was absent from the request; `Some("")` overwrites with
/// an empty string. A JSON `null` is rejected rather than read as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRecordUpdate {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub addressln1: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub addressln2: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl PatientRecordUpdate {
    /// Present fields as (column, value), in [`COLUMNS`] order.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        let fields = [
            &self.firstname,
            &self.lastname,
            &self.middlename,
            &self.addressln1,
            &self.addressln2,
            &self.city,
            &self.state,
            &self.zip,
            &self.phone,
            &self.email,
        ];
        COLUMNS
            .iter()
            .zip(fields)
            .filter_map(|(col, v)| v.as_deref().map(|v| (*col, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> PatientRecord {
        NewPatientRecord {
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            middlename: "Q".into(),
            addressln1: "1 Main St".into(),
            addressln2: "Apt 2".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62704".into(),
            phone: "555-0100".into(),
            email: "jane@example.com".into(),
        }
        .into_record(1)
    }

    #[test]
    fn into_record_assigns_id_and_keeps_fields() {
        let record = jane();
        assert_eq!(record.id, 1);
        assert_eq!(record.addressln2, "Apt 2");
        assert_eq!(record.email, "jane@example.com");
    }

    #[test]
    fn absent_fields_are_not_changes() {
        let update: PatientRecordUpdate = serde_json::from_str(r#"{"city": "Chicago"}"#).unwrap();
        assert_eq!(update.changes(), vec![("city", "Chicago")]);
        assert!(!update.is_empty());
    }

    #[test]
    fn empty_update_has_no_changes() {
        let update: PatientRecordUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
        assert!(update.changes().is_empty());
    }

    #[test]
    fn empty_string_is_a_change_but_omission_is_not() {
        let update: PatientRecordUpdate = serde_json::from_str(r#"{"addressln2": ""}"#).unwrap();
        assert_eq!(update.changes(), vec![("addressln2", "")]);
    }

    #[test]
    fn changes_follow_column_order() {
        let update = PatientRecordUpdate {
            email: Some("jd@example.org".into()),
            phone: Some("555-0199".into()),
            firstname: Some("Janet".into()),
            ..Default::default()
        };
        assert_eq!(
            update.changes(),
            vec![("firstname", "Janet"), ("phone", "555-0199"), ("email", "jd@example.org")]
        );
    }

    #[test]
    fn null_is_not_absent() {
        assert!(serde_json::from_str::<PatientRecordUpdate>(r#"{"city": null}"#).is_err());
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = PatientRecordUpdate {
            zip: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"zip": ""}));
    }

    #[test]
    fn values_follow_column_order() {
        let new = NewPatientRecord {
            firstname: "a".into(),
            lastname: "b".into(),
            middlename: "c".into(),
            addressln1: "d".into(),
            addressln2: "e".into(),
            city: "f".into(),
            state: "g".into(),
            zip: "h".into(),
            phone: "i".into(),
            email: "j".into(),
        };
        assert_eq!(new.values(), ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }
}
