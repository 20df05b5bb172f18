//! HTTP API handlers for fyyur-site

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::extract::rejection::PathRejection;
use fyyur_common::views::SearchResults;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use health::health_routes;
pub use home::home;

/// `search_term` field of the search forms
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Search results echoed with the term that produced them
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}

/// Path id that must be an integer; anything else is a missing page
pub(crate) fn record_id(
    path: Result<axum::extract::Path<i64>, PathRejection>,
) -> Result<i64, ApiError> {
    path.map(|axum::extract::Path(id)| id)
        .map_err(|rejection| ApiError::NotFound(rejection.body_text()))
}
