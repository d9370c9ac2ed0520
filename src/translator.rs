//! Translation driver
//!
//! Turns one experiment document and a soil source into the experiment,
//! soil, cultivar and ecotype file texts, and writes them out. Independent
//! inputs (grid cells) can be translated in parallel; each translation
//! builds its own tables.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::assembler::Assembly;
use crate::config::TranslatorConfig;
use crate::cultivar::writer::{generate_cul, generate_eco};
use crate::error::ModifierError;
use crate::model::ExperimentSet;
use crate::soil::{self, SoilCatalog};
use crate::xfile::XFileGenerator;

/// Texts of the four output files. `cul` and `eco` are empty when no
/// cultivars were generated.
#[derive(Debug, Clone, Default)]
pub struct Documents {
    pub xfile: String,
    pub sol: String,
    pub cul: String,
    pub eco: String,
    /// Coefficient modifiers that could not be applied.
    pub modifier_errors: Vec<ModifierError>,
}

/// Translate an experiment set against a soil source.
pub fn translate(
    set: &ExperimentSet,
    catalog: &SoilCatalog,
    config: &TranslatorConfig,
) -> crate::error::Result<Documents> {
    let assembly = Assembly::build(set, catalog, config.assembly_options())?;

    let xfile = XFileGenerator::new(config.y2k).generate(&assembly);
    let sol = soil::writer::generate(&assembly.soils);
    let cul = generate_cul(assembly.coefficients.cultivars(), &config.cul_name(), &config.version)?;
    let eco = generate_eco(assembly.coefficients.ecotypes(), &config.eco_name(), &config.version)?;

    info!(
        xfile = xfile.len(),
        sol = sol.len(),
        cul = cul.len(),
        eco = eco.len(),
        "documents generated"
    );
    Ok(Documents {
        xfile,
        sol,
        cul,
        eco,
        modifier_errors: assembly.modifier_errors,
    })
}

/// Load the configured inputs and translate them.
pub fn translate_files(config: &TranslatorConfig) -> Result<Documents> {
    let set = ExperimentSet::load(&config.efile)
        .with_context(|| format!("Failed to load experiments: {:?}", config.efile))?;
    let catalog = SoilCatalog::load(&config.sfile)?;
    Ok(translate(&set, &catalog, config)?)
}

/// Write the documents to the configured paths. Cultivar and ecotype files
/// are written only when not empty.
pub fn write_outputs(documents: &Documents, config: &TranslatorConfig) -> Result<()> {
    write_file(&config.xfile, &documents.xfile)?;
    if !documents.cul.is_empty() {
        if let Some(cul_file) = &config.cul_file {
            replace_file(cul_file, &documents.cul)?;
        }
    }
    if !documents.eco.is_empty() {
        replace_file(&config.eco_file, &documents.eco)?;
    }
    write_file(&config.sol_file, &documents.sol)?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

/// Write through a fresh file: a symlink at `path` is removed first so a
/// shared target is never overwritten.
fn replace_file(path: &Path, contents: &str) -> Result<()> {
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_link {
        fs::remove_file(path).with_context(|| format!("Failed to unlink {:?}", path))?;
    }
    write_file(path, contents)
}

/// Outcome of one cell.
#[derive(Debug)]
pub struct CellReport {
    pub cell: String,
    pub result: Result<Documents>,
}

impl CellReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Translate and write one cell. Failures are logged with the cell label.
pub fn translate_cell(cell: &str, config: &TranslatorConfig) -> CellReport {
    let result = translate_files(config).and_then(|documents| {
        write_outputs(&documents, config)?;
        Ok(documents)
    });
    if let Err(e) = &result {
        error!(cell, "translation failed: {:#}", e);
    }
    CellReport {
        cell: cell.to_string(),
        result,
    }
}

/// Translate independent cells in parallel. One failing cell does not stop
/// the others.
pub fn translate_batch(cells: &[(String, TranslatorConfig)]) -> Vec<CellReport> {
    let reports: Vec<CellReport> = cells
        .par_iter()
        .map(|(cell, config)| translate_cell(cell, config))
        .collect();
    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    info!(cells = reports.len(), failed, "batch finished");
    reports
}
