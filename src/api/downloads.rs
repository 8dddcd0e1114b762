//! Download manager seam
//!
//! Transfers are not implemented; the in-memory manager only lists records.

use async_trait::async_trait;

use crate::api::catalog::CatalogError;
use crate::api::fixtures;
use crate::models::DownloadRecord;

/// Access to locally tracked downloads
#[async_trait]
pub trait DownloadManager: Send + Sync {
    async fn list(&self) -> Result<Vec<DownloadRecord>, CatalogError>;
}

/// Fixture-backed download list
#[derive(Debug, Default)]
pub struct InMemoryDownloads {
    records: Vec<DownloadRecord>,
}

impl InMemoryDownloads {
    /// Manager seeded with the default fixtures
    pub fn new() -> Self {
        Self::with_records(fixtures::downloads())
    }

    pub fn with_records(records: Vec<DownloadRecord>) -> Self {
        Self { records }
    }

    /// Manager with nothing downloaded
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DownloadManager for InMemoryDownloads {
    async fn list(&self) -> Result<Vec<DownloadRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}
