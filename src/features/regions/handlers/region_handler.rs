use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::regions::dtos::FlattenedRegionDto;
use crate::features::regions::services::RegionIndexService;
use crate::shared::types::{ApiResponse, Meta};

/// List every region path in catalog order with its depth
#[utoipa::path(
    get,
    path = "/api/regions",
    responses(
        (status = 200, description = "Flattened region listing", body = ApiResponse<Vec<FlattenedRegionDto>>),
        (status = 502, description = "Region index unavailable or unparseable")
    ),
    tag = "regions"
)]
pub async fn list_regions(
    State(service): State<Arc<RegionIndexService>>,
) -> Result<Json<ApiResponse<Vec<FlattenedRegionDto>>>> {
    let records = service.list_records().await?;
    let meta = Meta {
        total: records.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(records), None, Some(meta))))
}

/// Indented text listing, one region per line
#[utoipa::path(
    get,
    path = "/api/regions/text",
    responses(
        (status = 200, description = "Indented region listing", body = String, content_type = "text/plain"),
        (status = 502, description = "Region index unavailable or unparseable")
    ),
    tag = "regions"
)]
pub async fn list_regions_text(
    State(service): State<Arc<RegionIndexService>>,
) -> Result<String> {
    service.render_text().await
}
