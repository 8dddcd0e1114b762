//! ReelTUI - movie catalog browser for the terminal
//!
//! Home carousels, debounced title search, downloads and settings behind a
//! floating nav bar that slides away while scrolling down.
//!
//! # Modules
//!
//! - `models` - Catalog, download and search records
//! - `api` - Catalog and download services with in-memory fakes
//! - `motion` - Spring, range interpolation, scroll-driven bar visibility
//! - `search` - Title filter and last-query-wins debounced search
//! - `route` - Path-like navigation destinations
//! - `config` - TOML configuration
//! - `app` - Application state and navigation
//! - `ui` - TUI rendering
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod motion;
pub mod route;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use models::{
    CastMember, DownloadRecord, DownloadStatus, FeaturedMovie, MovieDetail, MovieSummary,
    RecentSearch, SearchResult, Titled, TrendingSearch, WatchProgress,
};

pub use api::{CatalogError, CatalogService, DownloadManager, InMemoryCatalog, InMemoryDownloads};
pub use app::App;
pub use config::Config;
pub use motion::{BarPose, NavBarConfig, ScrollDirection, ScrollVisibilityController};
pub use route::Route;
pub use search::{filter_titles, DebouncedSearch, Filtered};
