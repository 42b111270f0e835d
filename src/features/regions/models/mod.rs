mod catalog;
mod region_node;

pub use catalog::CatalogDocument;
pub use region_node::{RegionIndex, RegionNode};
