//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the clients that supply the raw region index document.

pub mod geofabrik;
