pub mod flatten;
mod region_service;

pub use flatten::{flatten, FlattenedRecord};
pub use region_service::RegionIndexService;
