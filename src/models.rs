//! Data structures and types for ReelTUI
//!
//! Flat display records shared across screens, organized by domain:
//! - **Catalog**: movie summaries, featured hero, continue-watching entries
//! - **Detail**: full movie detail with cast
//! - **Downloads**: locally tracked download records
//! - **Search**: search hits, recent and trending searches

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Titled Records
// =============================================================================

/// Anything the title filter can match against
pub trait Titled {
    fn title(&self) -> &str;
}

// =============================================================================
// Catalog Models
// =============================================================================

/// Movie card shown in carousels and grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub rating: f32,
    pub image_url: String,
}

impl MovieSummary {
    pub fn new(id: &str, title: &str, rating: f32, image_url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            rating,
            image_url: image_url.to_string(),
        }
    }
}

impl Titled for MovieSummary {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ★ {:.1}", self.title, self.rating)
    }
}

/// Hero banner on the home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedMovie {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub rating: f32,
}

/// A partially watched movie with its playback progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProgress {
    #[serde(flatten)]
    pub movie: MovieSummary,
    /// Percent watched, 0..=100
    pub progress: u8,
}

impl WatchProgress {
    /// Fraction watched (0.0 - 1.0)
    pub fn ratio(&self) -> f64 {
        f64::from(self.progress.min(100)) / 100.0
    }
}

impl Titled for WatchProgress {
    fn title(&self) -> &str {
        &self.movie.title
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Cast member shown in the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: String,
    pub name: String,
    pub character: String,
    pub profile_image: String,
}

/// Full movie detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Human readable runtime, e.g. "2h 28m"
    pub duration: String,
    pub release_date: String,
    pub genres: Vec<String>,
    /// Audience score in percent
    pub rating: u8,
    pub cast: Vec<CastMember>,
}

impl Titled for MovieDetail {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - ★ {}%",
            self.title, self.release_date, self.duration, self.rating
        )
    }
}

// =============================================================================
// Download Models
// =============================================================================

/// Download lifecycle as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Downloaded,
    Paused,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::Downloading => write!(f, "Downloading"),
            DownloadStatus::Downloaded => write!(f, "Downloaded"),
            DownloadStatus::Paused => write!(f, "Paused"),
        }
    }
}

/// A locally tracked download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub status: DownloadStatus,
    pub file_size: String,
    pub resolution: String,
}

impl DownloadRecord {
    /// Status line as rendered under the title
    pub fn status_label(&self) -> String {
        match self.status {
            DownloadStatus::Downloading => format!("Downloading {}%", self.progress.min(100)),
            other => other.to_string(),
        }
    }

    /// "size | resolution" footer
    pub fn file_info(&self) -> String {
        format!("{} | {}", self.file_size, self.resolution)
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.progress.min(100)) / 100.0
    }
}

impl Titled for DownloadRecord {
    fn title(&self) -> &str {
        &self.title
    }
}

// =============================================================================
// Search Models
// =============================================================================

/// Search hit with enough metadata for a grid card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub rating: f32,
    pub genres: Vec<String>,
}

impl Titled for SearchResult {
    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ★ {:.1}", self.title, self.year, self.rating)
    }
}

/// A search the user opened before
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    /// Unix epoch milliseconds
    pub timestamp: u64,
}

/// A popular search suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingSearch {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub search_count: u32,
}
