//! Landing page

use axum::{extract::State, Json};
use fyyur_common::db::{artists, venues};
use fyyur_common::views::{home_page, HomePage};

use crate::error::ApiResult;
use crate::{AppState, RECENT_LISTINGS_LIMIT};

/// GET /
///
/// Most recently listed venues and artists, newest first.
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomePage>> {
    let recent_venues = venues::recent_venues(&state.db, RECENT_LISTINGS_LIMIT).await?;
    let recent_artists = artists::recent_artists(&state.db, RECENT_LISTINGS_LIMIT).await?;
    Ok(Json(home_page(&recent_venues, &recent_artists)))
}
