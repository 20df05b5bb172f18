//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking site:
//! - Database schema, records and queries
//! - Form decoding and validation
//! - View-model assembly (grouping, search, past/upcoming split)
//! - Configuration loading
//! - Clock abstraction for "now"-relative classification

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod time;
pub mod views;

pub use error::{Error, Result};
pub use time::{Clock, FixedClock, SystemClock};
