//! Experiment file generator
//!
//! Orchestrates the section writers over an assembled set of treatments to
//! produce the complete experiment file text.

use tracing::debug;

use crate::assembler::Assembly;
use crate::utils::dates::DateFormat;
use crate::xfile::sections::{
    chemicals, cultivars, environment, fertilizers, fields, general, harvest,
    initial_conditions, irrigation, planting, residues, simulation, soil_analysis, tillage,
    treatments,
};

/// Experiment file generator. Holds only the date layout.
#[derive(Debug, Clone, Copy)]
pub struct XFileGenerator {
    dates: DateFormat,
}

impl XFileGenerator {
    /// `y2k` selects four-digit years where the layout allows them.
    pub fn new(y2k: bool) -> Self {
        XFileGenerator {
            dates: DateFormat::from_y2k(y2k),
        }
    }

    pub fn dates(&self) -> DateFormat {
        self.dates
    }

    /// Generate the complete experiment file.
    pub fn generate(&self, assembly: &Assembly) -> String {
        let mut sections = Vec::with_capacity(16);

        sections.push(general::generate(&assembly.meta));
        sections.push(treatments::generate(&assembly.treatments));
        sections.push(cultivars::generate(&assembly.cultivars));
        sections.push(fields::generate(&assembly.fields));
        sections.push(soil_analysis::generate(&assembly.soil_analyses));
        sections.push(initial_conditions::generate(
            &assembly.initial_conditions,
            &assembly.soils,
            self.dates,
        ));
        sections.push(planting::generate(&assembly.plantings, self.dates));
        sections.push(irrigation::generate(&assembly.irrigations, self.dates));
        sections.push(fertilizers::generate(&assembly.fertilizers));
        sections.push(residues::generate(&assembly.residues));
        sections.push(chemicals::generate(&assembly.chemicals));
        sections.push(tillage::generate(&assembly.tillages));
        sections.push(environment::generate(&assembly.environments));
        sections.push(harvest::generate(&assembly.harvests));
        sections.push(simulation::generate(&assembly.controls, self.dates));

        debug!(
            written = sections.iter().filter(|s| !s.is_empty()).count(),
            "experiment file sections"
        );
        sections.concat()
    }
}

impl Default for XFileGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}
