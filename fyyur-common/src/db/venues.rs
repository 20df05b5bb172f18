//! Venue database operations
//!
//! Every write runs in its own transaction; an error drops the transaction,
//! which rolls it back.

use crate::db::models::{NewVenue, Venue};
use crate::{Error, Result};
use sqlx::types::Json;
use sqlx::SqlitePool;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website_link, seeking_talent, seeking_description, genres";

/// All venues in creation order
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues ORDER BY id ASC",
        VENUE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Most recently listed venues first
pub async fn recent_venues(pool: &SqlitePool, limit: i64) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues ORDER BY id DESC LIMIT ?",
        VENUE_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Load venue by id
pub async fn load_venue(pool: &SqlitePool, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("Venue", id))
}

pub async fn count_venues(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a venue, returning its generated id
pub async fn insert_venue(pool: &SqlitePool, venue: &NewVenue) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link, facebook_link,
            website_link, seeking_talent, seeking_description, genres
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(Json(&venue.genres))
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Overwrite every editable field of an existing venue
pub async fn update_venue(pool: &SqlitePool, id: i64, venue: &NewVenue) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_talent = ?, seeking_description = ?, genres = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(Json(&venue.genres))
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("Venue", id));
    }

    tx.commit().await?;
    Ok(())
}

/// Delete a venue and every show it hosts, returning the removed record
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<Venue> {
    let mut tx = pool.begin().await?;

    let venue = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::not_found("Venue", id))?;

    sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(venue)
}
