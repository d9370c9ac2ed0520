//! Scalar leaf values
//!
//! Experiment data arrives as JSON where the same field may be spelled as a
//! string (`"1.5"`), a number (`1.5`) or occasionally a boolean. The layout
//! writers only ever need the text, so every leaf is normalised into a
//! `Scalar` on the way in. Floats keep their shortest round-trip spelling
//! with a trailing `.0` for integral values.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Text value of one record field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(text: impl Into<String>) -> Self {
        Scalar(text.into())
    }

    /// Scalar for a computed number, spelled `110.0`, `0.25`, `1e-7`.
    pub fn number(value: f64) -> Self {
        Scalar(format!("{:?}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, ignoring surrounding whitespace.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for blank text (after trimming).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar(s)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar(if v { "True" } else { "False" }.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::number(v))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}
