//! Artwork record type.

use serde::Deserialize;
use serde::Serialize;

/// Stable identifier of an artwork in the collection.
pub type ArtworkId = u64;

/// A single artwork as returned by the collection API.
///
/// Every descriptive field is nullable upstream and stays optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// API field names backing each artwork, used for the `fields` projection.
    pub const FIELDS: [&'static str; 7] = [
        "id",
        "title",
        "place_of_origin",
        "artist_display",
        "inscriptions",
        "date_start",
        "date_end",
    ];

    /// Creates an artwork with only an id set.
    pub fn new(id: ArtworkId) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
