//! Venue pages and venue lifecycle

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Form, Json,
};
use fyyur_common::db::{shows, venues, Venue};
use fyyur_common::forms::{form_options, venue_from_form, FormFields, FormOptions};
use fyyur_common::views::{
    edit_form, group_venues_by_location, search_by_name, venue_detail, EditForm, LocationGroup,
    VenueDetail,
};
use tracing::info;

use super::{record_id, SearchForm, SearchPage};
use crate::error::{ApiResult, NoticeExt};
use crate::notice::Outcome;
use crate::AppState;

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<LocationGroup>>> {
    let all_venues = venues::list_venues(&state.db).await?;
    let all_shows = shows::list_shows(&state.db).await?;
    Ok(Json(group_venues_by_location(
        &all_venues,
        &all_shows,
        state.now(),
    )))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Json<SearchPage>> {
    let all_venues = venues::list_venues(&state.db).await?;
    let all_shows = shows::list_shows(&state.db).await?;
    let results = search_by_name(&form.search_term, &all_venues, &all_shows, state.now());
    Ok(Json(SearchPage {
        search_term: form.search_term,
        results,
    }))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<VenueDetail>> {
    let id = record_id(path)?;
    let venue = venues::load_venue(&state.db, id).await?;
    let hosted = shows::shows_for_venue(&state.db, id).await?;
    Ok(Json(venue_detail(venue, hosted, state.now())))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormOptions> {
    Json(form_options())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<(StatusCode, Json<Outcome>)> {
    let fields = FormFields::new(pairs);
    let failure = format!(
        "An error occurred. Venue {} could not be listed.",
        fields.text("name").unwrap_or_default()
    );

    let venue = venue_from_form(&fields).or_notice(failure.as_str())?;
    let id = venues::insert_venue(&state.db, &venue)
        .await
        .or_notice(failure)?;

    info!("Listed venue {} as id {}", venue.name, id);
    Ok((
        StatusCode::CREATED,
        Json(Outcome::success(
            id,
            format!("Venue {} was successfully listed!", venue.name),
        )),
    ))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EditForm<Venue>>> {
    let id = record_id(path)?;
    let venue = venues::load_venue(&state.db, id).await?;
    Ok(Json(edit_form(venue)))
}

/// POST /venues/:id/edit
///
/// Full replace of the editable fields. A missing venue is reported before
/// the form is looked at.
pub async fn update_venue(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<Outcome>> {
    let id = record_id(path)?;
    let current = venues::load_venue(&state.db, id).await?;

    let fields = FormFields::new(pairs);
    let failure = format!(
        "An error occurred. Venue {} could not be updated!",
        fields.text("name").unwrap_or(&current.name)
    );

    let venue = venue_from_form(&fields).or_notice(failure.as_str())?;
    venues::update_venue(&state.db, id, &venue)
        .await
        .or_notice(failure)?;

    info!("Updated venue {}", id);
    Ok(Json(Outcome::success(
        id,
        format!("Venue {} was successfully updated!", venue.name),
    )))
}

/// POST /venues/:id/delete
///
/// Removes the venue together with every show it hosts.
pub async fn delete_venue(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Outcome>> {
    let id = record_id(path)?;
    let deleted = venues::delete_venue(&state.db, id)
        .await
        .or_notice(format!("Could not delete venue {}!", id))?;

    info!("Deleted venue {} ({})", id, deleted.name);
    Ok(Json(Outcome::success(
        id,
        format!("{} successfully deleted!", deleted.name),
    )))
}
