//! View-model assembly
//!
//! Pure functions turning persisted records into the shapes the site
//! displays. Nothing here touches the store or reads the clock: every
//! "now"-relative classification takes the evaluation instant as `now`.
//!
//! A show is upcoming iff `start_time > now`; otherwise it is past.

use crate::db::models::{
    Artist, Show, ShowListing, ShowWithArtist, ShowWithVenue, Venue,
};
use crate::forms::{form_options, FormOptions};
use crate::time::format_timestamp;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// Anything carrying a show start time
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for Show {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ShowWithArtist {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ShowWithVenue {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time > now
}

/// A listed entity that owns shows (venues host them, artists play them)
pub trait ShowOwner {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    /// Id of the owner of this kind referenced by `show`
    fn owner_of(show: &Show) -> i64;
}

impl ShowOwner for Venue {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_of(show: &Show) -> i64 {
        show.venue_id
    }
}

impl ShowOwner for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_of(show: &Show) -> i64 {
        show.artist_id
    }
}

/// `{id, name}` reference used by lists and the home page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub id: i64,
    pub name: String,
}

/// Entity with its upcoming-show count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

/// Shows partitioned around the evaluation instant
#[derive(Debug, Clone, PartialEq)]
pub struct ShowSplit<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// A show on a venue page: who plays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show on an artist page: where they play
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// One row of the show board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowBoardEntry {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    pub upcoming: bool,
}

/// Latest venues and artists for the landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub venues: Vec<NameRef>,
    pub artists: Vec<NameRef>,
}

/// Current values used to pre-populate an edit form
#[derive(Debug, Clone, Serialize)]
pub struct EditForm<T> {
    pub record: T,
    pub options: FormOptions,
}

/// Artists and venues a show form can reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowChoices {
    pub artists: Vec<NameRef>,
    pub venues: Vec<NameRef>,
}

/// Number of upcoming shows per owner id
pub fn upcoming_counts<E: ShowOwner>(shows: &[Show], now: NaiveDateTime) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| is_upcoming(s.start_time, now)) {
        *counts.entry(E::owner_of(show)).or_insert(0) += 1;
    }
    counts
}

fn summarize<E: ShowOwner>(entity: &E, counts: &HashMap<i64, usize>) -> ListingSummary {
    ListingSummary {
        id: entity.id(),
        name: entity.name().to_string(),
        num_upcoming_shows: counts.get(&entity.id()).copied().unwrap_or(0),
    }
}

/// Group venues by (city, state), groups in order of first appearance
pub fn group_venues_by_location(
    venues: &[Venue],
    shows: &[Show],
    now: NaiveDateTime,
) -> Vec<LocationGroup> {
    let counts = upcoming_counts::<Venue>(shows, now);
    let mut groups: Vec<LocationGroup> = Vec::new();

    for venue in venues {
        let summary = summarize(venue, &counts);
        match groups
            .iter_mut()
            .find(|g| g.city == venue.city && g.state == venue.state)
        {
            Some(group) => group.venues.push(summary),
            None => groups.push(LocationGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![summary],
            }),
        }
    }

    groups
}

/// Case-insensitive substring search over entity names
pub fn search_by_name<E: ShowOwner>(
    term: &str,
    entities: &[E],
    shows: &[Show],
    now: NaiveDateTime,
) -> SearchResults {
    let needle = term.to_lowercase();
    let counts = upcoming_counts::<E>(shows, now);

    let data: Vec<ListingSummary> = entities
        .iter()
        .filter(|e| e.name().to_lowercase().contains(&needle))
        .map(|e| summarize(e, &counts))
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

/// Partition shows into past (`<= now`) and upcoming (`> now`), keeping order
pub fn split_by_time<T: Scheduled>(shows: Vec<T>, now: NaiveDateTime) -> ShowSplit<T> {
    let (upcoming, past): (Vec<T>, Vec<T>) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time(), now));
    ShowSplit { past, upcoming }
}

fn artist_appearance(show: ShowWithArtist) -> ArtistAppearance {
    ArtistAppearance {
        artist_id: show.artist_id,
        artist_name: show.artist_name,
        artist_image_link: show.artist_image_link,
        start_time: format_timestamp(&show.start_time),
    }
}

fn venue_appearance(show: ShowWithVenue) -> VenueAppearance {
    VenueAppearance {
        venue_id: show.venue_id,
        venue_name: show.venue_name,
        venue_image_link: show.venue_image_link,
        start_time: format_timestamp(&show.start_time),
    }
}

/// Venue page: fields plus past/upcoming shows
pub fn venue_detail(venue: Venue, shows: Vec<ShowWithArtist>, now: NaiveDateTime) -> VenueDetail {
    let split = split_by_time(shows, now);
    let past_shows: Vec<_> = split.past.into_iter().map(artist_appearance).collect();
    let upcoming_shows: Vec<_> = split.upcoming.into_iter().map(artist_appearance).collect();

    VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: venue.genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Artist page: fields plus past/upcoming shows
pub fn artist_detail(artist: Artist, shows: Vec<ShowWithVenue>, now: NaiveDateTime) -> ArtistDetail {
    let split = split_by_time(shows, now);
    let past_shows: Vec<_> = split.past.into_iter().map(venue_appearance).collect();
    let upcoming_shows: Vec<_> = split.upcoming.into_iter().map(venue_appearance).collect();

    ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: artist.genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub fn show_board_entry(show: ShowListing, now: NaiveDateTime) -> ShowBoardEntry {
    ShowBoardEntry {
        id: show.id,
        venue_id: show.venue_id,
        venue_name: show.venue_name,
        artist_id: show.artist_id,
        artist_name: show.artist_name,
        artist_image_link: show.artist_image_link,
        start_time: format_timestamp(&show.start_time),
        upcoming: is_upcoming(show.start_time, now),
    }
}

pub fn show_board(shows: Vec<ShowListing>, now: NaiveDateTime) -> Vec<ShowBoardEntry> {
    shows
        .into_iter()
        .map(|show| show_board_entry(show, now))
        .collect()
}

pub fn name_refs<E: ShowOwner>(entities: &[E]) -> Vec<NameRef> {
    entities
        .iter()
        .map(|e| NameRef {
            id: e.id(),
            name: e.name().to_string(),
        })
        .collect()
}

/// Landing page from already-limited, newest-first lists
pub fn home_page(recent_venues: &[Venue], recent_artists: &[Artist]) -> HomePage {
    HomePage {
        venues: name_refs(recent_venues),
        artists: name_refs(recent_artists),
    }
}

pub fn edit_form<T>(record: T) -> EditForm<T> {
    EditForm {
        record,
        options: form_options(),
    }
}

pub fn show_choices(artists: &[Artist], venues: &[Venue]) -> ShowChoices {
    ShowChoices {
        artists: name_refs(artists),
        venues: name_refs(venues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2026, 10, 19, 12)
    }

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: None,
            phone: None,
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_talent: false,
            seeking_description: None,
            genres: vec![],
        }
    }

    fn artist(id: i64, name: &str) -> Artist {
        Artist {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: vec!["Jazz".to_string()],
            image_link: None,
            facebook_link: None,
            website_link: Some("https://example.com".to_string()),
            seeking_venue: true,
            seeking_description: None,
        }
    }

    fn show(id: i64, artist_id: i64, venue_id: i64, start_time: NaiveDateTime) -> Show {
        Show {
            id,
            artist_id,
            venue_id,
            start_time,
        }
    }

    #[test]
    fn test_group_by_location_one_group_per_pair() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(4, "Springfield Hall", "Springfield", "IL"),
            venue(5, "Springfield Barn", "Springfield", "MO"),
        ];
        let shows = vec![
            show(1, 1, 1, at(2035, 1, 1, 20)),
            show(2, 1, 1, at(2036, 1, 1, 20)),
            show(3, 1, 1, at(2019, 1, 1, 20)),
            show(4, 1, 3, at(2035, 1, 1, 20)),
        ];

        let groups = group_venues_by_location(&venues, &shows, now());

        let pairs: Vec<(&str, &str)> = groups
            .iter()
            .map(|g| (g.city.as_str(), g.state.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("San Francisco", "CA"),
                ("New York", "NY"),
                ("Springfield", "IL"),
                ("Springfield", "MO"),
            ]
        );

        // Each group holds exactly the venues sharing its pair
        for group in &groups {
            let ids: HashSet<i64> = group.venues.iter().map(|v| v.id).collect();
            let expected: HashSet<i64> = venues
                .iter()
                .filter(|v| v.city == group.city && v.state == group.state)
                .map(|v| v.id)
                .collect();
            assert_eq!(ids, expected);
        }

        assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
        assert_eq!(groups[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(groups[1].venues[0].num_upcoming_shows, 0);
    }

    #[test]
    fn test_group_by_location_empty() {
        assert!(group_venues_by_location(&[], &[], now()).is_empty());
    }

    #[test]
    fn test_search_venues_case_insensitive() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "Oak Hill", "Oakland", "CA"),
        ];

        let results = search_by_name("hop", &venues, &[], now());
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Musical Hop");

        let results = search_by_name("HOP", &venues, &[], now());
        assert_eq!(results.count, 1);
    }

    #[test]
    fn test_search_artists_single_letter_matches_all() {
        let artists = vec![
            artist(4, "Guns N Petals"),
            artist(5, "Matt Quevado"),
            artist(6, "The Wild Sax Band"),
        ];
        let shows = vec![
            show(1, 5, 1, at(2035, 4, 1, 20)),
            show(2, 6, 1, at(2035, 4, 8, 20)),
            show(3, 6, 1, at(2035, 4, 15, 20)),
        ];

        let results = search_by_name("A", &artists, &shows, now());
        assert_eq!(results.count, 3);
        let counts: Vec<(i64, usize)> = results
            .data
            .iter()
            .map(|d| (d.id, d.num_upcoming_shows))
            .collect();
        assert_eq!(counts, vec![(4, 0), (5, 1), (6, 2)]);

        let results = search_by_name("band", &artists, &shows, now());
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");
    }

    #[test]
    fn test_search_no_match_and_empty_term() {
        let venues = vec![venue(1, "The Musical Hop", "San Francisco", "CA")];
        assert_eq!(search_by_name("zzz", &venues, &[], now()).count, 0);
        assert_eq!(search_by_name("", &venues, &[], now()).count, 1);
    }

    #[test]
    fn test_split_boundary_is_past() {
        let instant = now();
        let shows = vec![
            show(1, 1, 1, instant),
            show(2, 1, 1, instant + chrono::Duration::seconds(1)),
            show(3, 1, 1, instant - chrono::Duration::seconds(1)),
        ];

        let split = split_by_time(shows, instant);
        let past: Vec<i64> = split.past.iter().map(|s| s.id).collect();
        let upcoming: Vec<i64> = split.upcoming.iter().map(|s| s.id).collect();
        assert_eq!(past, vec![1, 3]);
        assert_eq!(upcoming, vec![2]);
    }

    #[test]
    fn test_split_every_show_in_exactly_one_side() {
        let shows: Vec<Show> = (0..20)
            .map(|i| show(i, 1, 1, at(2026, 10, 19, 2) + chrono::Duration::hours(i)))
            .collect();

        let split = split_by_time(shows.clone(), now());
        assert_eq!(split.past.len() + split.upcoming.len(), shows.len());
        for s in &shows {
            let in_past = split.past.iter().any(|p| p.id == s.id);
            let in_upcoming = split.upcoming.iter().any(|u| u.id == s.id);
            assert!(in_past != in_upcoming);
            assert_eq!(in_past, s.start_time <= now());
        }
    }

    #[test]
    fn test_venue_detail_assembly() {
        let mut hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        hop.website_link = Some("https://www.themusicalhop.com".to_string());
        hop.genres = vec!["Jazz".to_string(), "Reggae".to_string()];

        let shows = vec![
            ShowWithArtist {
                show_id: 1,
                artist_id: 4,
                artist_name: "Guns N Petals".to_string(),
                artist_image_link: Some("https://images.example/gnp.jpg".to_string()),
                start_time: at(2019, 5, 21, 21),
            },
            ShowWithArtist {
                show_id: 2,
                artist_id: 5,
                artist_name: "Matt Quevado".to_string(),
                artist_image_link: None,
                start_time: at(2035, 6, 15, 23),
            },
        ];

        let detail = venue_detail(hop, shows, now());
        assert_eq!(detail.website.as_deref(), Some("https://www.themusicalhop.com"));
        assert_eq!(detail.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
        assert_eq!(detail.past_shows[0].start_time, "2019-05-21 21:00:00");
        assert_eq!(detail.upcoming_shows[0].artist_id, 5);
    }

    #[test]
    fn test_artist_detail_without_shows() {
        let detail = artist_detail(artist(4, "Guns N Petals"), vec![], now());
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 0);
        assert!(detail.seeking_venue);
        assert_eq!(detail.website.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_show_board_marks_upcoming() {
        let listing = |id: i64, start_time| ShowListing {
            id,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time,
        };

        let board = show_board(
            vec![listing(1, at(2019, 5, 21, 21)), listing(2, at(2035, 4, 1, 20))],
            now(),
        );
        assert!(!board[0].upcoming);
        assert!(board[1].upcoming);
        assert_eq!(board[1].start_time, "2035-04-01 20:00:00");
    }

    #[test]
    fn test_home_page_keeps_given_order() {
        let venues = vec![venue(3, "C", "X", "CA"), venue(2, "B", "X", "CA")];
        let artists = vec![artist(9, "Z")];
        let home = home_page(&venues, &artists);
        assert_eq!(
            home.venues,
            vec![
                NameRef { id: 3, name: "C".to_string() },
                NameRef { id: 2, name: "B".to_string() },
            ]
        );
        assert_eq!(home.artists.len(), 1);
    }

    #[test]
    fn test_detail_serializes_website_key() {
        let detail = artist_detail(artist(1, "Guns N Petals"), vec![], now());
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["website"], "https://example.com");
        assert!(json.get("website_link").is_none());
        assert_eq!(json["upcoming_shows"], serde_json::json!([]));
    }

    #[test]
    fn test_show_choices_lists_both_sides() {
        let choices = show_choices(&[artist(4, "Guns N Petals")], &[venue(1, "Hop", "X", "CA")]);
        assert_eq!(choices.artists[0].id, 4);
        assert_eq!(choices.venues[0].name, "Hop");
    }
}
