//! Database schema migrations
//!
//! Versioned, idempotent upgrades tracked in the `schema_version` table.
//! `create_schema` always builds the current layout for new databases; the
//! migrations here bring databases created by earlier releases up to date.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - they must remain stable for upgrading databases
//! 2. **Always add new migrations** - one migration function per schema change
//! 3. **Use ALTER TABLE** - prefer ALTER TABLE over DROP/CREATE to preserve data

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    Ok(())
}

/// Migration v1: index shows by venue, artist and start time
///
/// Detail pages and upcoming-show counts filter shows by owner and time.
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v1: Index shows by venue, artist and start_time");

    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_shows_venue_id ON shows(venue_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_artist_id ON shows(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

/// Migration v2: add listing columns missing from early databases
///
/// The first schema only carried name, location, phone and social links.
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v2: Add website/seeking/genres/updated_at columns to venues and artists");

    let columns: [(&str, &str, &str); 10] = [
        ("venues", "website_link", "TEXT"),
        ("venues", "seeking_talent", "INTEGER NOT NULL DEFAULT 0"),
        ("venues", "seeking_description", "TEXT"),
        ("venues", "genres", "TEXT NOT NULL DEFAULT '[]'"),
        ("artists", "website_link", "TEXT"),
        ("artists", "seeking_venue", "INTEGER NOT NULL DEFAULT 0"),
        ("artists", "seeking_description", "TEXT"),
        ("artists", "genres", "TEXT NOT NULL DEFAULT '[]'"),
        ("venues", "updated_at", "TIMESTAMP"),
        ("artists", "updated_at", "TIMESTAMP"),
    ];

    for (table, column, definition) in columns {
        add_column_if_missing(pool, table, column, definition).await?;
    }

    Ok(())
}

async fn add_column_if_missing(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<()> {
    let has_column: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name = ?",
        table
    ))
    .bind(column)
    .fetch_one(pool)
    .await?;

    if has_column > 0 {
        return Ok(());
    }

    sqlx::query(&format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table, column, definition
    ))
    .execute(pool)
    .await?;

    info!("  ✓ Added {} column to {} table", column, table);
    Ok(())
}
