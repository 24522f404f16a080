//! Database bootstrap: create the database if needed, then the schema, status enum,
//! id sequence and products table. Every step is idempotent.

use crate::error::{AppError, ConfigError};
use crate::model::ProductStatus;
use crate::sql::{qualified, quoted, ID_SEQUENCE, PRODUCTS_TABLE, STATUS_TYPE};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// DDL statements in dependency order.
pub fn migration_statements(schema: &str) -> Vec<String> {
    let status_type = qualified(schema, STATUS_TYPE);
    let values: Vec<String> = ProductStatus::ALL
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect();
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)),
        // CREATE TYPE has no IF NOT EXISTS.
        format!(
            "DO $$ BEGIN CREATE TYPE {} AS ENUM ({}); EXCEPTION WHEN duplicate_object THEN NULL; END $$",
            status_type,
            values.join(", ")
        ),
        format!("CREATE SEQUENCE IF NOT EXISTS {}", qualified(schema, ID_SEQUENCE)),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
                "product_id" TEXT PRIMARY KEY CHECK (btrim("product_id") <> ''),
                "status" {},
                "fulfillment_center" TEXT,
                "quantity" INTEGER,
                "value" DOUBLE PRECISION
            )"#,
            qualified(schema, PRODUCTS_TABLE),
            status_type
        ),
    ]
}

pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in migration_statements(schema) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "products table ready");
    Ok(())
}

/// Ensure the database named in `database_url` exists; create it if not. Connects to the
/// `postgres` database on the same server to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_opts, db_name) = admin_target(database_url)?;
    let Some(db_name) = db_name.filter(|name| !name.is_empty() && name != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connect options for the `postgres` database on the target server, and the target database name.
fn admin_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}
