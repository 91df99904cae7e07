//! Database bootstrap: create the database, schema, and patient table when missing.
//! Idempotent; there is no versioned migration history.

use crate::error::AppError;
use crate::model::COLUMNS;
use crate::sql::{quoted, TableRef, ID_COLUMN};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// DDL for the patient table: identity primary key plus one `TEXT NOT NULL` column per field.
pub fn create_table_sql(table: &TableRef) -> String {
    let mut col_defs = vec![format!(
        "{} BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY",
        quoted(ID_COLUMN)
    )];
    col_defs.extend(COLUMNS.iter().map(|c| format!("{} TEXT NOT NULL", quoted(c))));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        table.qualified(),
        col_defs.join(",\n  ")
    )
}

/// Create the schema (if not exists) and the patient table (if not exists).
pub async fn ensure_patient_table(pool: &PgPool, table: &TableRef) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&table.schema)))
        .execute(pool)
        .await?;
    let ddl = create_table_sql(table);
    tracing::debug!(sql = %ddl, "ensure table");
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = %table.qualified(), "patient table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split a connection URL into (URL of the `postgres` maintenance database, database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let invalid = || {
        AppError::Config(crate::error::ConfigError::Invalid {
            key: "DATABASE_URL",
            value: url.to_string(),
        })
    };
    let scheme_end = url.find("://").ok_or_else(invalid)? + 3;
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(invalid)?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}
