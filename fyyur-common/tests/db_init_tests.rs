//! Integration tests for database initialization
//!
//! Tests cover:
//! - Automatic database creation (including missing parent folders)
//! - Reopening an existing database keeps its records
//! - Schema version recorded after first run

use fyyur_common::db::init::init_database;
use fyyur_common::db::migrations::get_schema_version;
use fyyur_common::db::models::NewVenue;
use fyyur_common::db::venues::{count_venues, insert_venue};

fn sample_venue() -> NewVenue {
    NewVenue {
        name: "The Musical Hop".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: Some("1015 Folsom Street".to_string()),
        phone: None,
        image_link: None,
        facebook_link: None,
        website_link: None,
        seeking_talent: false,
        seeking_description: None,
        genres: vec!["Jazz".to_string()],
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("fyyur.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_reopen_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");

    let pool = init_database(&db_path).await.unwrap();
    insert_venue(&pool, &sample_venue()).await.unwrap();
    pool.close().await;

    let reopened = init_database(&db_path).await.unwrap();
    assert_eq!(count_venues(&reopened).await.unwrap(), 1);
}

#[tokio::test]
async fn test_schema_version_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");

    let pool = init_database(&db_path).await.unwrap();
    let version = get_schema_version(&pool).await.unwrap();
    assert!(version >= 1, "expected migrations to run, got v{}", version);
}
