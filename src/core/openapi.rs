use utoipa::{Modify, OpenApi};

use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        regions_handlers::list_regions,
        regions_handlers::list_regions_text,
    ),
    components(
        schemas(
            Meta,
            regions_dtos::FlattenedRegionDto,
            ApiResponse<Vec<regions_dtos::FlattenedRegionDto>>,
        )
    ),
    tags(
        (name = "regions", description = "Flattened Geofabrik region catalog"),
    ),
    info(
        title = "Geofabrik Regions API",
        version = "0.1.0",
        description = "Flattened listing of the Geofabrik region catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
