//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the patient table.

use crate::model::{PatientRecordUpdate, COLUMNS};

/// Primary key column.
pub const ID_COLUMN: &str = "id";

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified table the statements target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        TableRef {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Full qualified table name.
    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(&self.table))
    }
}

/// SELECT / RETURNING list: id then content columns.
fn select_column_list() -> String {
    std::iter::once(ID_COLUMN)
        .chain(COLUMNS)
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Statements that do not depend on the request. Built once per store.
#[derive(Clone, Debug)]
pub struct PatientQueries {
    pub table: TableRef,
    pub select_by_id: String,
    pub select_all: String,
    pub insert: String,
    pub delete: String,
}

impl PatientQueries {
    pub fn new(table: TableRef) -> Self {
        let t = table.qualified();
        let cols = select_column_list();
        let id = quoted(ID_COLUMN);
        let insert_cols = COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
        let placeholders = (1..=COLUMNS.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        PatientQueries {
            select_by_id: format!("SELECT {} FROM {} WHERE {} = $1", cols, t, id),
            select_all: format!("SELECT {} FROM {} ORDER BY {}", cols, t, id),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                t, insert_cols, placeholders, cols
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1", t, id),
            table,
        }
    }

    /// UPDATE by id: SET only columns present in `changes`, values bound in [`COLUMNS`] order,
    /// id bound last. `None` when nothing is present.
    pub fn update(&self, changes: &PatientRecordUpdate) -> Option<String> {
        let changes = changes.changes();
        if changes.is_empty() {
            return None;
        }
        let sets = changes
            .iter()
            .enumerate()
            .map(|(i, (col, _))| format!("{} = ${}", quoted(col), i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table.qualified(),
            sets,
            quoted(ID_COLUMN),
            changes.len() + 1,
            select_column_list()
        ))
    }
}
