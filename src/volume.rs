//! Data contracts for the Google Books volumes API.
//!
//! Everything here mirrors the wire format of the `volumes.list` and
//! `volumes.get` endpoints. Beyond `id` and `title` the catalog guarantees
//! nothing: search results are routinely partial and a detail fetch for the
//! same id may carry more fields, so every other field is optional and
//! absence is a normal state, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One page of search results from `volumes.list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_items: u64,
    /// Absent when the query matched nothing; treated as an empty page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Volume>,
}

impl SearchResponse {
    /// The response `search` returns for an empty query without calling out.
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            items: Vec::new(),
        }
    }
}

/// One catalog entry. The `id` is opaque and is the sole key used to
/// re-fetch full details later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// May contain HTML markup as served by the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u64>,
    #[serde(default, skip_serializing_if = "ImageLinks::is_empty")]
    pub image_links: ImageLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

impl VolumeInfo {
    /// Comma-joined author list, or `None` when the catalog has no authors.
    pub fn author_line(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }
}

/// ISBN-10/ISBN-13/etc. entry as served by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// The catalog's size tags for cover art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    SmallThumbnail,
    Thumbnail,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ImageSize {
    /// The key used on the wire for this size tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SmallThumbnail => "smallThumbnail",
            Self::Thumbnail => "thumbnail",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extraLarge",
        }
    }
}

/// Cover image URLs keyed by size tag. Kept as an open mapping so new tags
/// from the catalog survive a round trip instead of being dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ImageLinks(BTreeMap<String, String>);

impl ImageLinks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, size: ImageSize) -> Option<&str> {
        self.0.get(size.tag()).map(String::as_str)
    }

    /// Preferred cover for rendering: medium, then thumbnail, then the
    /// small thumbnail.
    pub fn cover(&self) -> Option<&str> {
        self.get(ImageSize::Medium)
            .or_else(|| self.get(ImageSize::Thumbnail))
            .or_else(|| self.get(ImageSize::SmallThumbnail))
    }
}

impl FromIterator<(String, String)> for ImageLinks {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
