//! Backend service seams
//!
//! - Catalog: movie lists, detail and title search
//! - Downloads: locally tracked download records
//!
//! Both are in-memory fakes today; a real backend plugs in behind the traits.

pub mod catalog;
pub mod downloads;
pub mod fixtures;

pub use catalog::{CatalogError, CatalogService, InMemoryCatalog};
pub use downloads::{DownloadManager, InMemoryDownloads};
