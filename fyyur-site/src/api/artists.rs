//! Artist pages and artist lifecycle

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Form, Json,
};
use fyyur_common::db::{artists, shows, Artist};
use fyyur_common::forms::{artist_from_form, form_options, FormFields, FormOptions};
use fyyur_common::views::{
    artist_detail, edit_form, name_refs, search_by_name, ArtistDetail, EditForm, NameRef,
};
use tracing::info;

use super::{record_id, SearchForm, SearchPage};
use crate::error::{ApiResult, NoticeExt};
use crate::notice::Outcome;
use crate::AppState;

/// GET /artists
///
/// Directory of every artist, ordered by name.
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<NameRef>>> {
    let all_artists = artists::list_artists_by_name(&state.db).await?;
    Ok(Json(name_refs(&all_artists)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Json<SearchPage>> {
    let all_artists = artists::list_artists(&state.db).await?;
    let all_shows = shows::list_shows(&state.db).await?;
    let results = search_by_name(&form.search_term, &all_artists, &all_shows, state.now());
    Ok(Json(SearchPage {
        search_term: form.search_term,
        results,
    }))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ArtistDetail>> {
    let id = record_id(path)?;
    let artist = artists::load_artist(&state.db, id).await?;
    let booked = shows::shows_for_artist(&state.db, id).await?;
    Ok(Json(artist_detail(artist, booked, state.now())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormOptions> {
    Json(form_options())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<(StatusCode, Json<Outcome>)> {
    let fields = FormFields::new(pairs);
    let failure = format!(
        "An error occurred. Artist {} could not be listed.",
        fields.text("name").unwrap_or_default()
    );

    let artist = artist_from_form(&fields).or_notice(failure.as_str())?;
    let id = artists::insert_artist(&state.db, &artist)
        .await
        .or_notice(failure)?;

    info!("Listed artist {} as id {}", artist.name, id);
    Ok((
        StatusCode::CREATED,
        Json(Outcome::success(
            id,
            format!("Artist {} was successfully listed!", artist.name),
        )),
    ))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EditForm<Artist>>> {
    let id = record_id(path)?;
    let artist = artists::load_artist(&state.db, id).await?;
    Ok(Json(edit_form(artist)))
}

/// POST /artists/:id/edit
pub async fn update_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<Outcome>> {
    let id = record_id(path)?;
    let current = artists::load_artist(&state.db, id).await?;

    let fields = FormFields::new(pairs);
    let failure = format!(
        "An error occurred. Artist {} could not be updated!",
        fields.text("name").unwrap_or(&current.name)
    );

    let artist = artist_from_form(&fields).or_notice(failure.as_str())?;
    artists::update_artist(&state.db, id, &artist)
        .await
        .or_notice(failure)?;

    info!("Updated artist {}", id);
    Ok(Json(Outcome::success(
        id,
        format!("Artist {} was successfully updated!", artist.name),
    )))
}

/// POST /artists/:id/delete
pub async fn delete_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Outcome>> {
    let id = record_id(path)?;
    let deleted = artists::delete_artist(&state.db, id)
        .await
        .or_notice(format!("Could not delete artist {}!", id))?;

    info!("Deleted artist {} ({})", id, deleted.name);
    Ok(Json(Outcome::success(
        id,
        format!("{} successfully deleted!", deleted.name),
    )))
}
