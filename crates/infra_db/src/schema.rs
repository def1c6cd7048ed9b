//! Schema bootstrap
//!
//! Creates the claims database and table on first start. Both steps check
//! the catalog before acting, so running them against an initialized server
//! changes nothing.

use sqlx::{Connection, PgConnection, PgPool};
use tracing::{info, instrument};

use crate::error::DatabaseError;

/// DDL for the claims table
pub const CLAIMS_SCHEMA: &str =
    include_str!("../../../migrations/20240101_000001_initial_schema.sql");

/// Creates the database if it does not exist yet
///
/// # Arguments
///
/// * `root_url` - URL of a database the connecting role can reach (usually `postgres`)
/// * `name` - Database to create; only ASCII letters, digits, and `_` are accepted
///
/// # Returns
///
/// `true` if the database was created, `false` if it already existed
#[instrument(skip(root_url))]
pub async fn ensure_database(root_url: &str, name: &str) -> Result<bool, DatabaseError> {
    validate_database_name(name)?;

    let mut conn = PgConnection::connect(root_url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(name)
            .fetch_one(&mut conn)
            .await?;

    let created = if exists {
        info!(database = name, "Database already exists");
        false
    } else {
        // CREATE DATABASE takes no bind parameters; the name is validated above
        sqlx::query(&format!("CREATE DATABASE \"{}\"", name))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseError::SchemaFailed(e.to_string()))?;
        info!(database = name, "Database created");
        true
    };

    conn.close().await?;
    Ok(created)
}

/// Creates the `claims` table if it does not exist yet
///
/// # Returns
///
/// `true` if the table was created, `false` if it already existed
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<bool, DatabaseError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = 'claims'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if exists {
        info!("Claims table already exists");
        return Ok(false);
    }

    sqlx::raw_sql(CLAIMS_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::SchemaFailed(e.to_string()))?;

    info!("Claims table created");
    Ok(true)
}

fn validate_database_name(name: &str) -> Result<(), DatabaseError> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DatabaseError::InvalidConfiguration(format!(
            "invalid database name '{}'",
            name
        )))
    }
}
