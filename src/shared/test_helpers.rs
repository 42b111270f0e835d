#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::modules::geofabrik::IndexSource;

/// Nested catalog with a pathless grouping node
#[cfg(test)]
pub const NESTED_SAMPLE: &str = r#"{
    "subregions": [
        {
            "path": "europe",
            "subregions": [
                { "path": "europe/albania", "subregions": [] },
                {
                    "path": "europe/germany",
                    "subregions": [{ "path": "europe/germany/berlin" }]
                }
            ]
        },
        { "subregions": [{ "path": "asia/japan" }] }
    ]
}"#;

/// Serves a fixed document
#[cfg(test)]
pub struct StaticIndexSource {
    body: Vec<u8>,
}

#[cfg(test)]
impl StaticIndexSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

#[cfg(test)]
#[async_trait]
impl IndexSource for StaticIndexSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "static test document".to_string()
    }
}

/// Always fails as if the catalog host were down
#[cfg(test)]
pub struct FailingIndexSource;

#[cfg(test)]
#[async_trait]
impl IndexSource for FailingIndexSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Err(AppError::ExternalServiceError(
            "Region index request failed: connection refused".to_string(),
        ))
    }

    fn describe(&self) -> String {
        "unreachable test host".to_string()
    }
}
