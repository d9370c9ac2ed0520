//! Translator configuration
//!
//! File names and switches of one translation, read from a JSON file. Every
//! key is optional; missing keys take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assembler::AssemblyOptions;
use crate::cultivar::writer::VERSION_46;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Experiment JSON input
    pub efile: PathBuf,
    /// Soil source (JSON, CSV or Parquet)
    pub sfile: PathBuf,
    #[serde(rename = "Xfile")]
    pub xfile: PathBuf,
    #[serde(rename = "SOLfile")]
    pub sol_file: PathBuf,
    /// Cultivar output; cultivars are generated only when set
    #[serde(rename = "CULfile")]
    pub cul_file: Option<PathBuf>,
    #[serde(rename = "ECOfile")]
    pub eco_file: PathBuf,
    /// Cultivar file format version
    pub version: String,
    /// Derive soil hydraulics from texture
    pub pfcn: bool,
    /// Four-digit years in the experiment file
    pub y2k: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            efile: PathBuf::from("exp.json"),
            sfile: PathBuf::from("soil.json"),
            xfile: PathBuf::from("exp.X"),
            sol_file: PathBuf::from("soil.SOL"),
            cul_file: None,
            eco_file: PathBuf::from("MZCER045.ECO"),
            version: VERSION_46.to_string(),
            pfcn: false,
            y2k: true,
        }
    }
}

impl TranslatorConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&contents).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            use_ptransfer: self.pfcn,
            generate_cultivars: self.cul_file.is_some(),
        }
    }

    /// Cultivar file name as written into the generated headers.
    pub fn cul_name(&self) -> String {
        file_name(self.cul_file.as_deref().unwrap_or(Path::new("")))
    }

    pub fn eco_name(&self) -> String {
        file_name(&self.eco_file)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
