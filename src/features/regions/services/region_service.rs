use std::sync::Arc;

use crate::core::error::Result;
use crate::features::regions::dtos::FlattenedRegionDto;
use crate::features::regions::models::{CatalogDocument, RegionIndex};
use crate::features::regions::services::flatten::{flatten, render_text};
use crate::modules::geofabrik::IndexSource;

/// Loads the region index from its source and flattens it for listing
pub struct RegionIndexService {
    source: Arc<dyn IndexSource>,
}

impl RegionIndexService {
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self { source }
    }

    /// Fetch, parse and nest the index
    pub async fn load_index(&self) -> Result<RegionIndex> {
        let origin = self.source.describe();
        tracing::info!("Loading region index from {}", origin);

        let bytes = self.source.fetch().await?;
        let document = CatalogDocument::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to parse region index from {}: {:?}", origin, e);
            e
        })?;

        let index = document.into_index();
        if index.is_empty() {
            tracing::warn!("Region index from {} lists no regions", origin);
        }
        tracing::info!(
            "Region index loaded: {} top-level regions",
            index.subregions.len()
        );

        Ok(index)
    }

    /// Like [`load_index`](Self::load_index), but reports the failure and
    /// hands back `None` so callers have nothing to flatten.
    pub async fn try_load_index(&self) -> Option<RegionIndex> {
        match self.load_index().await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::error!("Region index unavailable: {}", e);
                None
            }
        }
    }

    pub async fn list_records(&self) -> Result<Vec<FlattenedRegionDto>> {
        let index = self.load_index().await?;
        Ok(flatten(&index).map(Into::into).collect())
    }

    pub async fn render_text(&self) -> Result<String> {
        let index = self.load_index().await?;
        Ok(render_text(flatten(&index)))
    }
}
