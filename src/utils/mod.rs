//! Shared layout helpers
//!
//! - `format`: fixed-width column rendering
//! - `dates`: DSSAT date encodings

pub mod format;
pub mod dates;

pub use dates::DateFormat;
pub use format::{fit, index2, index7, Col, MISSING};
