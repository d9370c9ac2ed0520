//! Experiment file section writers
//!
//! One module per `*SECTION` of the experiment file, in file order. Each
//! exposes a `generate` function returning the section text, or an empty
//! string when the section has no records.

pub mod general;
pub mod treatments;
pub mod cultivars;
pub mod fields;
pub mod soil_analysis;
pub mod initial_conditions;
pub mod planting;
pub mod irrigation;
pub mod fertilizers;
pub mod residues;
pub mod chemicals;
pub mod tillage;
pub mod environment;
pub mod harvest;
pub mod simulation;

use crate::model::{text_or, Scalar};
use crate::utils::dates::DateFormat;
use crate::utils::format::{Col, MISSING};

/// Column for an encoded date.
pub(crate) fn date_col(dates: DateFormat) -> Col {
    match dates {
        DateFormat::Extended => Col::text(8),
        DateFormat::Legacy => Col::text(5),
    }
}

/// Encoded date of an optional field, `-99` when absent.
pub(crate) fn date(dates: DateFormat, value: &Option<Scalar>) -> String {
    date_col(dates).fmt(&dates.encode(text_or(value, MISSING)))
}

/// Free-text name closing a row, preceded by `sep`.
pub(crate) fn trailing_name(sep: &str, value: &Option<Scalar>) -> String {
    format!("{}{}\n", sep, text_or(value, MISSING))
}
