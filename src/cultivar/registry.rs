//! Generated cultivars and ecotypes
//!
//! When a cultivar file is configured, every distinct (modified) cultivar
//! parameter set gets its own `CCnnnn` entry and every distinct ecotype set
//! its own six-digit ecotype number. Both tables are shared by all
//! experiments of one translation.

use tracing::warn;

use super::modifiers::apply_mods;
use crate::error::ModifierError;
use crate::model::{Experiment, ParamSet, Scalar};
use crate::xref::SectionTable;

/// Cultivar and ecotype sets of one experiment, after modifiers.
#[derive(Debug, Clone, Default)]
pub struct ExperimentParams {
    cultivars: Vec<ParamSet>,
    ecotypes: Vec<ParamSet>,
}

impl ExperimentParams {
    /// Apply the experiment's modifier sets. Failed coefficients are logged
    /// and returned alongside.
    pub fn new(experiment: &Experiment) -> (Self, Vec<ModifierError>) {
        let (cultivars, mut errors) = apply_mods(&experiment.cultivar, &experiment.cultivar_mods);
        let (ecotypes, eco_errors) = apply_mods(&experiment.ecotype, &experiment.ecotype_mods);
        errors.extend(eco_errors);
        (ExperimentParams { cultivars, ecotypes }, errors)
    }

    /// Cultivar set of a sequence without its `seqid`, empty when none.
    pub fn cultivar_for(&self, seqid: &str) -> ParamSet {
        params_for(&self.cultivars, seqid)
    }

    /// Ecotype set of a sequence without its `seqid`, empty when none.
    pub fn ecotype_for(&self, seqid: &str) -> ParamSet {
        params_for(&self.ecotypes, seqid)
    }
}

fn params_for(sets: &[ParamSet], seqid: &str) -> ParamSet {
    match sets.iter().find(|s| s.seqid() == seqid) {
        Some(set) => {
            let mut set = set.clone();
            set.remove("seqid");
            set
        }
        None => ParamSet::new(),
    }
}

/// Cultivar id written to the treatment for a 1-based cultivar index.
pub fn cultivar_id(index: usize) -> String {
    format!("CC{:04}", index.saturating_sub(1))
}

/// Ecotype number for a 1-based ecotype index.
pub fn ecotype_number(index: usize) -> String {
    format!("{:06}", index)
}

pub struct CultivarRegistry {
    cultivars: SectionTable<ParamSet>,
    ecotypes: SectionTable<ParamSet>,
}

impl Default for CultivarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CultivarRegistry {
    pub fn new() -> Self {
        CultivarRegistry {
            cultivars: SectionTable::new("cultivar coefficients"),
            ecotypes: SectionTable::new("ecotype coefficients"),
        }
    }

    /// Register a cultivar set (and its ecotype set, when not empty) and
    /// return the generated cultivar id. `crid` is the planting's crop code.
    ///
    /// Returns `None` for an empty cultivar set.
    pub fn register(
        &mut self,
        mut cultivar: ParamSet,
        mut ecotype: ParamSet,
        crid: Option<&Scalar>,
    ) -> Option<String> {
        if cultivar.is_empty() {
            return None;
        }
        if let Some(crid) = crid {
            cultivar.insert("crid", crid.clone());
        }
        if !ecotype.is_empty() {
            if let Some(crid) = crid {
                ecotype.insert("crid", crid.clone());
            }
            let eco = self.ecotypes.intern(ecotype);
            cultivar.insert("eco", ecotype_number(eco));
        }
        if !cultivar.contains_key("crid") {
            warn!("generated cultivar has no crop code");
        }
        let index = self.cultivars.intern(cultivar);
        Some(cultivar_id(index))
    }

    pub fn cultivars(&self) -> &[ParamSet] {
        self.cultivars.rows()
    }

    pub fn ecotypes(&self) -> &[ParamSet] {
        self.ecotypes.rows()
    }
}
