//! Submitted form decoding and validation
//!
//! Handlers receive already-decoded `(name, value)` pairs. Each entity has
//! one function that reads every field once and builds the record literal,
//! collecting all problems into a single [`Error::Validation`].

use crate::db::models::{NewArtist, NewShow, NewVenue};
use crate::time::parse_timestamp;
use crate::{Error, Result};
use serde::Serialize;

/// State codes offered by the venue and artist forms
pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genre names offered by the venue and artist forms
pub const GENRES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Choices needed to render the create/edit forms
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub states: Vec<&'static str>,
    pub genres: Vec<&'static str>,
}

pub fn form_options() -> FormOptions {
    FormOptions {
        states: US_STATES.to_vec(),
        genres: GENRES.to_vec(),
    }
}

/// Decoded form body; repeated keys keep submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First non-blank value for `key`, trimmed
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values(key).into_iter().find(|v| !v.is_empty())
    }

    /// Owned optional text, blank mapped to `None`
    pub fn optional(&self, key: &str) -> Option<String> {
        self.text(key).map(str::to_string)
    }

    /// Every non-blank value for `key`, in order
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.values(key)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: present with a truthy value
    pub fn flag(&self, key: &str) -> bool {
        self.values(key).into_iter().any(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "y" | "yes" | "on" | "true" | "1"
            )
        })
    }

    fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .collect()
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Accumulates field problems so one response reports all of them
#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(format!("{}: {}", field, message));
    }

    fn required<'a>(&mut self, fields: &'a FormFields, key: &str) -> &'a str {
        match fields.text(key) {
            Some(value) => value,
            None => {
                self.push(key, "this field is required");
                ""
            }
        }
    }

    fn state(&mut self, fields: &FormFields) -> String {
        let raw = self.required(fields, "state");
        if raw.is_empty() {
            return String::new();
        }
        let code = raw.to_ascii_uppercase();
        if !US_STATES.contains(&code.as_str()) {
            self.push("state", &format!("'{}' is not a valid choice", raw));
        }
        code
    }

    fn genres(&mut self, fields: &FormFields) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for raw in fields.all("genres") {
            match GENRES.iter().find(|g| g.eq_ignore_ascii_case(raw)) {
                Some(genre) if genres.iter().any(|g| g == genre) => {}
                Some(genre) => genres.push(genre.to_string()),
                None => self.push("genres", &format!("'{}' is not a valid choice", raw)),
            }
        }
        genres
    }

    fn link(&mut self, fields: &FormFields, key: &str) -> Option<String> {
        let value = fields.optional(key)?;
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            self.push(key, "must be an http(s) URL");
        }
        Some(value)
    }

    fn id(&mut self, fields: &FormFields, key: &str) -> i64 {
        let raw = self.required(fields, key);
        if raw.is_empty() {
            return 0;
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => {
                self.push(key, &format!("'{}' is not a valid id", raw));
                0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(Error::Validation(self.0.join("; ")))
        }
    }
}

/// Build the venue record from a submitted venue form
pub fn venue_from_form(fields: &FormFields) -> Result<NewVenue> {
    let mut problems = Problems::default();

    let venue = NewVenue {
        name: problems.required(fields, "name").to_string(),
        city: problems.required(fields, "city").to_string(),
        state: problems.state(fields),
        address: fields.optional("address"),
        phone: fields.optional("phone"),
        image_link: problems.link(fields, "image_link"),
        facebook_link: problems.link(fields, "facebook_link"),
        website_link: problems.link(fields, "website_link"),
        seeking_talent: fields.flag("seeking_talent"),
        seeking_description: fields.optional("seeking_description"),
        genres: problems.genres(fields),
    };

    problems.finish(venue)
}

/// Build the artist record from a submitted artist form
pub fn artist_from_form(fields: &FormFields) -> Result<NewArtist> {
    let mut problems = Problems::default();

    let artist = NewArtist {
        name: problems.required(fields, "name").to_string(),
        city: problems.required(fields, "city").to_string(),
        state: problems.state(fields),
        phone: fields.optional("phone"),
        genres: problems.genres(fields),
        image_link: problems.link(fields, "image_link"),
        facebook_link: problems.link(fields, "facebook_link"),
        website_link: problems.link(fields, "website_link"),
        seeking_venue: fields.flag("seeking_venue"),
        seeking_description: fields.optional("seeking_description"),
    };

    problems.finish(artist)
}

/// Build the show record from a submitted show form
///
/// Only shape is checked here; whether the artist and venue exist is
/// decided by the store inside the write transaction.
pub fn show_from_form(fields: &FormFields) -> Result<NewShow> {
    let mut problems = Problems::default();

    let artist_id = problems.id(fields, "artist_id");
    let venue_id = problems.id(fields, "venue_id");
    let raw_start = problems.required(fields, "start_time");
    let start_time = parse_timestamp(raw_start);
    if start_time.is_none() && !raw_start.is_empty() {
        problems.push("start_time", &format!("'{}' is not a valid date and time", raw_start));
    }

    match start_time {
        Some(start_time) => problems.finish(NewShow {
            artist_id,
            venue_id,
            start_time,
        }),
        None => Err(Error::Validation(problems.0.join("; "))),
    }
}
