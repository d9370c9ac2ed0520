//! Cultivar and ecotype coefficients
//!
//! - `crops`: per-crop coefficient tables
//! - `modifiers`: offset / scale / max / min / set arithmetic
//! - `registry`: generated cultivar and ecotype ids
//! - `writer`: CUL and ECO file layouts

pub mod crops;
pub mod modifiers;
pub mod registry;
pub mod writer;

pub use modifiers::apply_mods;
pub use registry::{CultivarRegistry, ExperimentParams};
