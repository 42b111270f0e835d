use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::regions::services::FlattenedRecord;

/// Response DTO for one entry of the flattened region listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedRegionDto {
    /// Levels below the catalog root (continents are 0)
    #[schema(example = 1)]
    pub depth: usize,
    /// Catalog path of the region, usable for downloads
    #[schema(example = "europe/albania")]
    pub path: String,
}

impl From<FlattenedRecord<'_>> for FlattenedRegionDto {
    fn from(record: FlattenedRecord<'_>) -> Self {
        Self {
            depth: record.depth,
            path: record.path.to_string(),
        }
    }
}
