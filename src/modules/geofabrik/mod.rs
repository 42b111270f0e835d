//! Region index sources
//!
//! An [`IndexSource`] hands back the raw bytes of a region catalog document.
//! Parsing and flattening happen in the regions feature; sources only know
//! how to get the bytes.

mod file_source;
mod index_client;

use async_trait::async_trait;

use crate::core::error::Result;

pub use file_source::FileIndexSource;
pub use index_client::GeofabrikClient;

/// Supplies the raw region index document
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetch the complete document
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable origin of the document, for logs
    fn describe(&self) -> String;
}
