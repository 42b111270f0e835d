//! Geofabrik region catalog feature.
//!
//! The catalog is a strict tree: continents, then countries, then
//! sub-regions. This feature loads it from an index source and flattens it
//! into `(depth, path)` records in catalog order.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions` | Flattened listing as JSON |
//! | GET | `/api/regions/text` | Indented text listing |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RegionIndexService;
