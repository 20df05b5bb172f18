//! Show board and show lifecycle

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Form, Json,
};
use fyyur_common::db::{artists, shows, venues};
use fyyur_common::forms::{show_from_form, FormFields};
use fyyur_common::views::{show_board, show_board_entry, show_choices, ShowBoardEntry, ShowChoices};
use tracing::info;

use super::record_id;
use crate::error::{ApiResult, NoticeExt};
use crate::notice::Outcome;
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowBoardEntry>>> {
    let listings = shows::list_show_listings(&state.db).await?;
    Ok(Json(show_board(listings, state.now())))
}

/// GET /shows/:id
pub async fn show_show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ShowBoardEntry>> {
    let id = record_id(path)?;
    let listing = shows::load_show(&state.db, id).await?;
    Ok(Json(show_board_entry(listing, state.now())))
}

/// GET /shows/create
///
/// Artists (by name) and venues a new show may reference.
pub async fn create_show_form(State(state): State<AppState>) -> ApiResult<Json<ShowChoices>> {
    let all_artists = artists::list_artists_by_name(&state.db).await?;
    let all_venues = venues::list_venues(&state.db).await?;
    Ok(Json(show_choices(&all_artists, &all_venues)))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<(StatusCode, Json<Outcome>)> {
    const FAILURE: &str = "An error occurred. Show could not be listed.";

    let fields = FormFields::new(pairs);
    let show = show_from_form(&fields).or_notice(FAILURE)?;
    let id = shows::insert_show(&state.db, &show)
        .await
        .or_notice(FAILURE)?;

    info!(
        "Listed show {} (artist {} at venue {})",
        id, show.artist_id, show.venue_id
    );
    Ok((
        StatusCode::CREATED,
        Json(Outcome::success(id, "Show was successfully listed!")),
    ))
}

/// POST /shows/:id/edit
pub async fn update_show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<Outcome>> {
    const FAILURE: &str = "An error occurred. Show could not be updated!";

    let id = record_id(path)?;
    shows::load_show(&state.db, id).await?;

    let fields = FormFields::new(pairs);
    let show = show_from_form(&fields).or_notice(FAILURE)?;
    shows::update_show(&state.db, id, &show)
        .await
        .or_notice(FAILURE)?;

    info!("Updated show {}", id);
    Ok(Json(Outcome::success(id, "Show was successfully updated!")))
}

/// POST /shows/:id/delete
pub async fn delete_show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Outcome>> {
    let id = record_id(path)?;
    shows::delete_show(&state.db, id)
        .await
        .or_notice(format!("Could not delete show {}!", id))?;

    info!("Deleted show {}", id);
    Ok(Json(Outcome::success(id, "Show successfully deleted!")))
}
