//! Artist database operations

use crate::db::models::{Artist, NewArtist};
use crate::{Error, Result};
use sqlx::types::Json;
use sqlx::SqlitePool;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, image_link, facebook_link, \
     website_link, seeking_venue, seeking_description";

/// All artists in creation order
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists ORDER BY id ASC",
        ARTIST_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// All artists alphabetically (ties by id)
pub async fn list_artists_by_name(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists ORDER BY name ASC, id ASC",
        ARTIST_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// Most recently listed artists first
pub async fn recent_artists(pool: &SqlitePool, limit: i64) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists ORDER BY id DESC LIMIT ?",
        ARTIST_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// Load artist by id
pub async fn load_artist(pool: &SqlitePool, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists WHERE id = ?",
        ARTIST_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("Artist", id))
}

pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert an artist, returning its generated id
pub async fn insert_artist(pool: &SqlitePool, artist: &NewArtist) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, genres, image_link, facebook_link,
            website_link, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(Json(&artist.genres))
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Overwrite every editable field of an existing artist
pub async fn update_artist(pool: &SqlitePool, id: i64, artist: &NewArtist) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_venue = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(Json(&artist.genres))
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("Artist", id));
    }

    tx.commit().await?;
    Ok(())
}

/// Delete an artist and every show they play, returning the removed record
pub async fn delete_artist(pool: &SqlitePool, id: i64) -> Result<Artist> {
    let mut tx = pool.begin().await?;

    let artist = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists WHERE id = ?",
        ARTIST_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::not_found("Artist", id))?;

    sqlx::query("DELETE FROM shows WHERE artist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(artist)
}
