//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all employee records. Uniqueness of
//! employee IDs and emails is enforced by the table itself.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // NOCASE keeps the uniqueness rules case-insensitive for both identifiers.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL DEFAULT '',
            employee_id TEXT NOT NULL COLLATE NOCASE UNIQUE
                CHECK (length(employee_id) <= 10),
            email TEXT NOT NULL COLLATE NOCASE UNIQUE,
            phone_number TEXT NOT NULL,
            department TEXT NOT NULL
                CHECK (department IN ('HR', 'Engineering', 'Marketing', 'Finance', 'Sales')),
            date_of_joining TEXT NOT NULL,
            role TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("Table 'employee_details' is ready");

    Ok(())
}
