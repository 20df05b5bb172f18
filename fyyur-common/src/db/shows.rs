//! Show database operations
//!
//! A show links one artist to one venue. Both must exist when the show is
//! written; the check runs inside the write transaction.

use crate::db::models::{NewShow, Show, ShowListing, ShowWithArtist, ShowWithVenue};
use crate::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};

const LISTING_SELECT: &str = r#"
    SELECT s.id AS id,
           s.venue_id AS venue_id,
           v.name AS venue_name,
           s.artist_id AS artist_id,
           a.name AS artist_name,
           a.image_link AS artist_image_link,
           s.start_time AS start_time
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Every show (bare rows, used for upcoming-show counts)
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<Show>> {
    let shows = sqlx::query_as::<_, Show>(
        "SELECT id, artist_id, venue_id, start_time FROM shows ORDER BY start_time ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Every show joined with venue and artist, earliest first
pub async fn list_show_listings(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(&format!(
        "{} ORDER BY s.start_time ASC, s.id ASC",
        LISTING_SELECT
    ))
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// One show joined with venue and artist
pub async fn load_show(pool: &SqlitePool, id: i64) -> Result<ShowListing> {
    sqlx::query_as::<_, ShowListing>(&format!("{} WHERE s.id = ?", LISTING_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::not_found("Show", id))
}

/// Shows hosted by a venue, with the performing artist
pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowWithArtist>> {
    let shows = sqlx::query_as::<_, ShowWithArtist>(
        r#"
        SELECT s.id AS show_id,
               a.id AS artist_id,
               a.name AS artist_name,
               a.image_link AS artist_image_link,
               s.start_time AS start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Shows played by an artist, with the hosting venue
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ShowWithVenue>> {
    let shows = sqlx::query_as::<_, ShowWithVenue>(
        r#"
        SELECT s.id AS show_id,
               v.id AS venue_id,
               v.name AS venue_name,
               v.image_link AS venue_image_link,
               s.start_time AS start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert a show, returning its generated id
pub async fn insert_show(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    ensure_participants_exist(&mut tx, show).await?;

    let id = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Overwrite artist, venue and start time of an existing show
pub async fn update_show(pool: &SqlitePool, id: i64, show: &NewShow) -> Result<()> {
    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shows WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(Error::not_found("Show", id));
    }

    ensure_participants_exist(&mut tx, show).await?;

    sqlx::query("UPDATE shows SET artist_id = ?, venue_id = ?, start_time = ? WHERE id = ?")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a single show
pub async fn delete_show(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM shows WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("Show", id));
    }

    Ok(())
}

/// Referential check for a show's artist and venue
async fn ensure_participants_exist(conn: &mut SqliteConnection, show: &NewShow) -> Result<()> {
    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(show.artist_id)
            .fetch_one(&mut *conn)
            .await?;
    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(show.venue_id)
        .fetch_one(&mut *conn)
        .await?;

    let mut problems = Vec::new();
    if !artist_exists {
        problems.push(format!("artist_id: artist {} does not exist", show.artist_id));
    }
    if !venue_exists {
        problems.push(format!("venue_id: venue {} does not exist", show.venue_id));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::artists::{delete_artist, insert_artist};
    use crate::db::init::init_memory_database;
    use crate::db::models::{NewArtist, NewVenue};
    use crate::db::venues::{delete_venue, insert_venue};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let venue_id = insert_venue(
            pool,
            &NewVenue {
                name: "The Dueling Pianos Bar".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                address: None,
                phone: None,
                image_link: Some("https://images.example/pianos.jpg".to_string()),
                facebook_link: None,
                website_link: None,
                seeking_talent: false,
                seeking_description: None,
                genres: vec![],
            },
        )
        .await
        .unwrap();

        let artist_id = insert_artist(
            pool,
            &NewArtist {
                name: "The Wild Sax Band".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                phone: None,
                genres: vec!["Jazz".to_string()],
                image_link: Some("https://images.example/sax.jpg".to_string()),
                facebook_link: None,
                website_link: None,
                seeking_venue: false,
                seeking_description: None,
            },
        )
        .await
        .unwrap();

        (venue_id, artist_id)
    }

    #[tokio::test]
    async fn test_insert_and_load_listing() {
        let pool = init_memory_database().await.unwrap();
        let (venue_id, artist_id) = seed(&pool).await;

        let id = insert_show(
            &pool,
            &NewShow {
                artist_id,
                venue_id,
                start_time: at(2035, 4, 1, 20),
            },
        )
        .await
        .unwrap();

        let listing = load_show(&pool, id).await.unwrap();
        assert_eq!(listing.venue_name, "The Dueling Pianos Bar");
        assert_eq!(listing.artist_name, "The Wild Sax Band");
        assert_eq!(listing.start_time, at(2035, 4, 1, 20));

        let for_venue = shows_for_venue(&pool, venue_id).await.unwrap();
        assert_eq!(for_venue.len(), 1);
        assert_eq!(for_venue[0].artist_id, artist_id);

        let for_artist = shows_for_artist(&pool, artist_id).await.unwrap();
        assert_eq!(for_artist.len(), 1);
        assert_eq!(
            for_artist[0].venue_image_link.as_deref(),
            Some("https://images.example/pianos.jpg")
        );
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_participants() {
        let pool = init_memory_database().await.unwrap();
        let (venue_id, _) = seed(&pool).await;

        let result = insert_show(
            &pool,
            &NewShow {
                artist_id: 404,
                venue_id,
                start_time: at(2035, 4, 1, 20),
            },
        )
        .await;

        match result {
            Err(Error::Validation(msg)) => assert!(msg.contains("artist 404")),
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(list_shows(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_venue_cascades_to_shows() {
        let pool = init_memory_database().await.unwrap();
        let (venue_id, artist_id) = seed(&pool).await;
        let show_id = insert_show(
            &pool,
            &NewShow {
                artist_id,
                venue_id,
                start_time: at(2019, 5, 21, 21),
            },
        )
        .await
        .unwrap();

        delete_venue(&pool, venue_id).await.unwrap();

        assert!(matches!(load_show(&pool, show_id).await, Err(Error::NotFound(_))));
        assert!(list_shows(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_artist_cascades_to_shows() {
        let pool = init_memory_database().await.unwrap();
        let (venue_id, artist_id) = seed(&pool).await;
        insert_show(
            &pool,
            &NewShow {
                artist_id,
                venue_id,
                start_time: at(2019, 5, 21, 21),
            },
        )
        .await
        .unwrap();

        delete_artist(&pool, artist_id).await.unwrap();
        assert!(shows_for_venue(&pool, venue_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_show() {
        let pool = init_memory_database().await.unwrap();
        let (venue_id, artist_id) = seed(&pool).await;
        let id = insert_show(
            &pool,
            &NewShow {
                artist_id,
                venue_id,
                start_time: at(2019, 5, 21, 21),
            },
        )
        .await
        .unwrap();

        update_show(
            &pool,
            id,
            &NewShow {
                artist_id,
                venue_id,
                start_time: at(2035, 6, 15, 23),
            },
        )
        .await
        .unwrap();
        assert_eq!(load_show(&pool, id).await.unwrap().start_time, at(2035, 6, 15, 23));

        let bad_venue = update_show(
            &pool,
            id,
            &NewShow {
                artist_id,
                venue_id: 999,
                start_time: at(2035, 6, 15, 23),
            },
        )
        .await;
        assert!(matches!(bad_venue, Err(Error::Validation(_))));

        delete_show(&pool, id).await.unwrap();
        assert!(matches!(delete_show(&pool, id).await, Err(Error::NotFound(_))));
        assert!(matches!(
            update_show(
                &pool,
                id,
                &NewShow {
                    artist_id,
                    venue_id,
                    start_time: at(2035, 6, 15, 23),
                }
            )
            .await,
            Err(Error::NotFound(_))
        ));
    }
}
