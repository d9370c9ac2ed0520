//! Soil profiles
//!
//! - `catalog`: soil source loading (JSON, CSV, Parquet)
//! - `pedotransfer`: hydraulic properties from texture
//! - `registry`: composite soil ids and initial-condition layers
//! - `writer`: SOL file layout

pub mod catalog;
pub mod pedotransfer;
pub mod registry;
pub mod writer;

pub use catalog::{SoilCatalog, SoilLayer, SoilProfile};
pub use registry::{composite_id, CompositeSoil, SoilKey, SoilRegistry, UNKNOWN_SOIL_ID};
