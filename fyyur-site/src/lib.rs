//! fyyur-site library - venue/artist booking site
//!
//! Routes map a method, path and form body onto one view-model build or one
//! create/update/delete against the store. Every response is JSON.

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDateTime;
use fyyur_common::{Clock, SystemClock};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod notice;

use error::ApiError;

/// Number of entries shown in each list on the landing page
pub const RECENT_LISTINGS_LIMIT: i64 = 10;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Source of "now" for past/upcoming classification
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// State reading the local wall clock
    pub fn with_system_clock(db: SqlitePool) -> Self {
        Self::new(db, Arc::new(SystemClock))
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let venues = Router::new()
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/create",
            get(api::venues::create_venue_form).post(api::venues::create_venue),
        )
        .route("/venues/:id", get(api::venues::show_venue))
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        )
        .route("/venues/:id/delete", post(api::venues::delete_venue));

    let artists = Router::new()
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/create",
            get(api::artists::create_artist_form).post(api::artists::create_artist),
        )
        .route("/artists/:id", get(api::artists::show_artist))
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        )
        .route("/artists/:id/delete", post(api::artists::delete_artist));

    let shows = Router::new()
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::create_show_form).post(api::shows::create_show),
        )
        .route("/shows/:id", get(api::shows::show_show))
        .route("/shows/:id/edit", post(api::shows::update_show))
        .route("/shows/:id/delete", post(api::shows::delete_show));

    Router::new()
        .route("/", get(api::home))
        .merge(venues)
        .merge(artists)
        .merge(shows)
        .merge(api::health_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("no such page".to_string())
}
