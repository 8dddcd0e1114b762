//! Catalog service seam
//!
//! Screens talk to the catalog only through [`CatalogService`]. The in-memory
//! implementation serves fixtures and simulates backend latency on search.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::fixtures;
use crate::models::{
    FeaturedMovie, MovieDetail, MovieSummary, SearchResult, TrendingSearch, WatchProgress,
};
use crate::search::filter_titles;

/// Latency the fake backend adds to every search
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(500);

/// Catalog error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the movie catalog
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Case-insensitive title search
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError>;

    async fn featured(&self) -> Result<FeaturedMovie, CatalogError>;
    async fn top_movies(&self) -> Result<Vec<MovieSummary>, CatalogError>;
    async fn upcoming(&self) -> Result<Vec<MovieSummary>, CatalogError>;
    async fn continue_watching(&self) -> Result<Vec<WatchProgress>, CatalogError>;
    async fn trending_searches(&self) -> Result<Vec<TrendingSearch>, CatalogError>;

    /// Full detail for a movie id
    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, CatalogError>;
}

/// Fixture-backed catalog
#[derive(Debug)]
pub struct InMemoryCatalog {
    index: Vec<SearchResult>,
    movies: Vec<MovieSummary>,
    details: Vec<MovieDetail>,
    latency: Duration,
    search_calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl InMemoryCatalog {
    /// Catalog seeded with the default fixtures
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_SEARCH_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            index: fixtures::search_index(),
            movies: fixtures::all_movies(),
            details: vec![fixtures::inception_detail()],
            latency,
            search_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Replace the searchable collection
    pub fn with_index(mut self, index: Vec<SearchResult>) -> Self {
        self.index = index;
        self
    }

    /// Number of filtering passes executed so far
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Query of the most recent filtering pass
    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().ok().and_then(|q| q.clone())
    }

    fn detail_from_summary(summary: &MovieSummary) -> MovieDetail {
        MovieDetail {
            id: summary.id.clone(),
            title: summary.title.clone(),
            description: "No overview available.".into(),
            image_url: summary.image_url.clone(),
            duration: "--".into(),
            release_date: "TBA".into(),
            genres: Vec::new(),
            rating: (summary.rating * 10.0).round().clamp(0.0, 100.0) as u8,
            cast: Vec::new(),
        }
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.to_string());
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let results = filter_titles(&self.index, query);
        debug!(query, hits = results.len(), "catalog search");
        Ok(results)
    }

    async fn featured(&self) -> Result<FeaturedMovie, CatalogError> {
        Ok(fixtures::featured())
    }

    async fn top_movies(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        Ok(fixtures::top_movies())
    }

    async fn upcoming(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        Ok(fixtures::upcoming_movies())
    }

    async fn continue_watching(&self) -> Result<Vec<WatchProgress>, CatalogError> {
        Ok(fixtures::continue_watching())
    }

    async fn trending_searches(&self) -> Result<Vec<TrendingSearch>, CatalogError> {
        Ok(fixtures::trending_searches())
    }

    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        if let Some(detail) = self.details.iter().find(|d| d.id == id) {
            return Ok(detail.clone());
        }

        self.movies
            .iter()
            .find(|m| m.id == id)
            .map(Self::detail_from_summary)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_search_dark_returns_dark_knight() {
        let results = catalog().search("dark").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Dark Knight");
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let results = catalog().search("zzz").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_counts_calls() {
        let catalog = catalog();
        catalog.search("in").await.unwrap();
        catalog.search("inc").await.unwrap();
        assert_eq!(catalog.search_calls(), 2);
        assert_eq!(catalog.last_query().as_deref(), Some("inc"));
    }

    #[tokio::test]
    async fn test_detail_literal() {
        let detail = catalog().movie_detail("1").await.unwrap();
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.rating, 88);
        assert_eq!(detail.cast.len(), 3);
    }

    #[tokio::test]
    async fn test_detail_derived_from_summary() {
        let detail = catalog().movie_detail("4").await.unwrap();
        assert_eq!(detail.title, "Dune: Part Two");
        assert_eq!(detail.rating, 92);
        assert!(detail.cast.is_empty());
    }

    #[tokio::test]
    async fn test_detail_unknown_id() {
        let err = catalog().movie_detail("999").await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound("999".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_simulates_latency() {
        let catalog = InMemoryCatalog::new();
        let start = tokio::time::Instant::now();
        catalog.search("inception").await.unwrap();
        assert!(start.elapsed() >= DEFAULT_SEARCH_LATENCY);
    }
}
