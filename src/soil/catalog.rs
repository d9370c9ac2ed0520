//! Soil source
//!
//! Profiles by external soil id, each with profile attributes and ordered
//! depth layers. Missing values read as `-99`.
//!
//! Sources:
//! - JSON: `{"soils": [{"soil_id": ..., <attrs>, "soilLayer": [{...}, ...]}]}`
//! - CSV / Parquet (long format): one row per profile x depth with `soil_id`,
//!   `depth` and one column per attribute. Profile attributes are taken from
//!   the first row of each profile; the layer depth becomes `sllb`.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::model::Scalar;
use crate::utils::format::MISSING;

/// True for values that stand for "no data".
pub fn is_missing(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == MISSING || v.parse::<f64>().map(|x| x == -99.0).unwrap_or(false)
}

/// Named attributes of a profile or a layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(FxHashMap<String, Scalar>);

impl Attributes {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw text, `-99` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(|s| s.as_str()).unwrap_or(MISSING)
    }

    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    /// Numeric value, `None` when absent, unparsable or `-99`.
    pub fn number(&self, key: &str) -> Option<f64> {
        let text = self.get(key);
        if is_missing(text) {
            None
        } else {
            text.trim().parse().ok()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilLayer {
    pub attrs: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilProfile {
    pub id: String,
    pub attrs: Attributes,
    pub layers: Vec<SoilLayer>,
}

/// All profiles of a soil source.
#[derive(Debug, Clone, Default)]
pub struct SoilCatalog {
    profiles: Vec<SoilProfile>,
    index: FxHashMap<String, usize>,
}

#[derive(Deserialize)]
struct JsonCatalog {
    #[serde(default)]
    soils: Vec<JsonProfile>,
}

#[derive(Deserialize)]
struct JsonProfile {
    #[serde(rename = "soilLayer", default)]
    layers: Vec<BTreeMap<String, Option<Scalar>>>,
    #[serde(flatten)]
    attrs: BTreeMap<String, Option<Scalar>>,
}

fn attributes(raw: BTreeMap<String, Option<Scalar>>) -> Attributes {
    let mut attrs = Attributes::default();
    for (k, v) in raw {
        attrs.insert(k, v.unwrap_or_else(|| Scalar::from(MISSING)));
    }
    attrs
}

impl SoilCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile. A later profile with the same id replaces the earlier.
    pub fn insert(&mut self, profile: SoilProfile) {
        match self.index.get(&profile.id) {
            Some(&i) => self.profiles[i] = profile,
            None => {
                self.index.insert(profile.id.clone(), self.profiles.len());
                self.profiles.push(profile);
            }
        }
    }

    pub fn get(&self, soil_id: &str) -> Option<&SoilProfile> {
        self.index.get(soil_id).map(|&i| &self.profiles[i])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Load a soil source, choosing the reader from the file extension
    /// (`.csv`, `.parquet`, anything else is JSON).
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let catalog = match ext.as_str() {
            "csv" => Self::load_csv(path)?,
            "parquet" | "pq" => Self::load_parquet(path)?,
            _ => Self::load_json(path)?,
        };
        debug!(profiles = catalog.len(), path = %path.display(), "soil source loaded");
        Ok(catalog)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read soil file: {:?}", path))?;
        Self::from_json(&contents).with_context(|| format!("Failed to parse soil JSON: {:?}", path))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: JsonCatalog = serde_json::from_str(contents)?;
        let mut catalog = SoilCatalog::new();
        for p in raw.soils {
            let attrs = attributes(p.attrs);
            let id = attrs.get("soil_id").to_string();
            let layers = p
                .layers
                .into_iter()
                .map(|l| SoilLayer {
                    attrs: attributes(l),
                })
                .collect();
            catalog.insert(SoilProfile { id, attrs, layers });
        }
        Ok(catalog)
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load soil CSV: {:?}", path))?;
        Ok(Self::from_dataframe(&df)?)
    }

    pub fn load_parquet(path: &Path) -> Result<Self> {
        let df = LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan soil parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load soil parquet: {:?}", path))?;
        Ok(Self::from_dataframe(&df)?)
    }

    /// Build a catalog from a long-format table.
    pub fn from_dataframe(df: &DataFrame) -> crate::error::Result<Self> {
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

        // every column as text; nulls become the sentinel
        let mut columns = Vec::with_capacity(names.len());
        for name in &names {
            columns.push(df.column(name)?.cast(&DataType::String)?);
        }
        let mut text = Vec::with_capacity(names.len());
        for c in &columns {
            text.push(c.str()?);
        }

        let id_pos = names.iter().position(|n| n == "soil_id").ok_or_else(|| {
            crate::error::TranslateError::MissingInput("soil table has no soil_id column".into())
        })?;
        let depth_pos = names.iter().position(|n| n == "depth");

        let mut catalog = SoilCatalog::new();
        let mut order: Vec<String> = Vec::new();
        let mut building: FxHashMap<String, SoilProfile> = FxHashMap::default();

        for row in 0..df.height() {
            let Some(id) = text[id_pos].get(row) else {
                continue;
            };

            let mut layer = Attributes::default();
            for (i, name) in names.iter().enumerate() {
                if i == id_pos {
                    continue;
                }
                let value = text[i].get(row).unwrap_or(MISSING);
                layer.insert(name.clone(), value);
            }
            if let Some(d) = depth_pos {
                layer.insert("sllb", text[d].get(row).unwrap_or(MISSING));
            }

            let profile = building.entry(id.to_string()).or_insert_with(|| {
                order.push(id.to_string());
                let mut attrs = layer.clone();
                attrs.insert("soil_id", id);
                SoilProfile {
                    id: id.to_string(),
                    attrs,
                    layers: Vec::new(),
                }
            });
            profile.layers.push(SoilLayer { attrs: layer });
        }

        for id in order {
            if let Some(p) = building.remove(&id) {
                catalog.insert(p);
            }
        }
        Ok(catalog)
    }
}
