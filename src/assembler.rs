//! Treatment assembly
//!
//! Walks every sequence of every experiment, builds the section records the
//! sequence refers to, interns them into their tables and records one
//! treatment row of 13 section indices.
//!
//! Tables are shared across experiments, so identical records coming from
//! different experiments collapse onto one row.

use tracing::{debug, info, warn};

use crate::cultivar::{CultivarRegistry, ExperimentParams};
use crate::error::{ModifierError, Result};
use crate::model::{
    text_or, Chemical, CultivarRef, EventKind, Experiment, ExperimentMeta, ExperimentSet,
    Fertilizer, FieldAttrs, Harvest, InitialConditions, Irrigation, OrganicMatter, Planting,
    EnvModification, Scalar, Sequence, SimControl, SoilData, SoilDataLayer, Tillage,
};
use crate::soil::{SoilCatalog, SoilKey, SoilRegistry};
use crate::xref::{Record, SectionTable};

/// Field table row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRecord {
    pub attrs: FieldAttrs,
    pub sldp: Option<Scalar>,
    pub flhst: Option<Scalar>,
    pub fhdur: Option<Scalar>,
    pub soil_id_composite: String,
}

impl Record for FieldRecord {
    fn is_blank(&self) -> bool {
        false
    }
}

/// Soil analysis table row: sampling date and (depth, SCS group) layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoilAnalysis {
    pub sadat: Option<Scalar>,
    pub layers: Vec<SoilDataLayer>,
}

impl Record for SoilAnalysis {
    fn is_blank(&self) -> bool {
        false
    }
}

impl SoilAnalysis {
    /// Analysis of a soil data block; `None` unless some layer carries an
    /// SCS group.
    pub fn from_soil_data(soil: &SoilData) -> Option<Self> {
        let has_analysis = soil
            .layers
            .iter()
            .any(|l| l.slsc.as_ref().is_some_and(|s| !s.is_empty()));
        has_analysis.then(|| SoilAnalysis {
            sadat: soil.sadat.clone(),
            layers: soil.layers.clone(),
        })
    }
}

/// Section indices of one treatment, 0 when the section is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levels {
    pub cultivar: usize,
    pub field: usize,
    pub soil_analysis: usize,
    pub initial_conditions: usize,
    pub planting: usize,
    pub irrigation: usize,
    pub fertilizer: usize,
    pub residues: usize,
    pub chemicals: usize,
    pub tillage: usize,
    pub environment: usize,
    pub harvest: usize,
    pub simulation: usize,
}

impl Levels {
    /// In treatment-table column order (CU FL SA IC MP MI MF MR MC MT ME MH SM).
    pub fn as_array(&self) -> [usize; 13] {
        [
            self.cultivar,
            self.field,
            self.soil_analysis,
            self.initial_conditions,
            self.planting,
            self.irrigation,
            self.fertilizer,
            self.residues,
            self.chemicals,
            self.tillage,
            self.environment,
            self.harvest,
            self.simulation,
        ]
    }
}

/// One row of the treatment table.
#[derive(Debug, Clone)]
pub struct Treatment {
    /// Sequence with its treatment number normalised.
    pub sequence: Sequence,
    pub levels: Levels,
}

/// Treatment number folded into 1..=999. A missing number is treatment 1.
pub fn normalize_trno(trno: Option<&Scalar>) -> String {
    let Some(t) = trno else {
        return "1".to_string();
    };
    let n = t
        .as_str()
        .trim()
        .parse::<i64>()
        .ok()
        .or_else(|| t.as_f64().map(|f| f.trunc() as i64));
    match n {
        Some(n) => ((n - 1).rem_euclid(999) + 1).to_string(),
        None => {
            warn!(trno = %t, "treatment number is not numeric");
            t.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyOptions {
    /// Derive hydraulic properties from texture.
    pub use_ptransfer: bool,
    /// Generate `CCnnnn` cultivars from the experiment's coefficient sets.
    pub generate_cultivars: bool,
}

/// All section tables of one translation.
pub struct Assembly<'a> {
    pub meta: ExperimentMeta,
    pub treatments: Vec<Treatment>,
    pub cultivars: SectionTable<CultivarRef>,
    pub fields: SectionTable<FieldRecord>,
    pub soil_analyses: SectionTable<SoilAnalysis>,
    pub initial_conditions: SectionTable<InitialConditions>,
    pub plantings: SectionTable<Planting>,
    pub irrigations: SectionTable<Vec<Irrigation>>,
    pub fertilizers: SectionTable<Vec<Fertilizer>>,
    pub residues: SectionTable<Vec<OrganicMatter>>,
    pub chemicals: SectionTable<Vec<Chemical>>,
    pub tillages: SectionTable<Vec<Tillage>>,
    pub environments: SectionTable<Vec<EnvModification>>,
    pub harvests: SectionTable<Vec<Harvest>>,
    pub controls: SectionTable<SimControl>,
    pub soils: SoilRegistry<'a>,
    pub coefficients: CultivarRegistry,
    pub modifier_errors: Vec<ModifierError>,
    options: AssemblyOptions,
}

/// Event lists of one sequence.
#[derive(Default)]
struct SequenceEvents {
    cultivar: CultivarRef,
    planting: Planting,
    irrigations: Vec<Irrigation>,
    fertilizers: Vec<Fertilizer>,
    residues: Vec<OrganicMatter>,
    chemicals: Vec<Chemical>,
    tillages: Vec<Tillage>,
    harvests: Vec<Harvest>,
}

impl<'a> Assembly<'a> {
    pub fn new(catalog: &'a SoilCatalog, options: AssemblyOptions) -> Self {
        Assembly {
            meta: ExperimentMeta::default(),
            treatments: Vec::new(),
            cultivars: SectionTable::new("cultivars"),
            fields: SectionTable::new("fields"),
            soil_analyses: SectionTable::new("soil analysis"),
            initial_conditions: SectionTable::new("initial conditions"),
            plantings: SectionTable::new("planting"),
            irrigations: SectionTable::new("irrigation"),
            fertilizers: SectionTable::new("fertilizers"),
            residues: SectionTable::new("residues"),
            chemicals: SectionTable::new("chemicals"),
            tillages: SectionTable::new("tillage"),
            environments: SectionTable::new("environment modifications"),
            harvests: SectionTable::new("harvest"),
            controls: SectionTable::new("simulation controls"),
            soils: SoilRegistry::new(catalog, options.use_ptransfer),
            coefficients: CultivarRegistry::new(),
            modifier_errors: Vec::new(),
            options,
        }
    }

    /// Assemble every sequence of every experiment.
    pub fn build(
        set: &ExperimentSet,
        catalog: &'a SoilCatalog,
        options: AssemblyOptions,
    ) -> Result<Self> {
        let mut assembly = Assembly::new(catalog, options);
        if let Some(first) = set.experiments.first() {
            assembly.meta = first.meta.clone();
        }
        for experiment in &set.experiments {
            assembly.add_experiment(experiment)?;
        }
        info!(
            treatments = assembly.treatments.len(),
            soils = assembly.soils.len(),
            cultivars = assembly.coefficients.cultivars().len(),
            "assembled treatments"
        );
        Ok(assembly)
    }

    pub fn add_experiment(&mut self, experiment: &Experiment) -> Result<()> {
        let (params, errors) = ExperimentParams::new(experiment);
        self.modifier_errors.extend(errors);

        for (j, sequence) in experiment.sequences().iter().enumerate() {
            let levels = self.add_sequence(experiment, &params, j, sequence)?;
            let mut sequence = sequence.clone();
            sequence.trno = Some(Scalar::new(normalize_trno(sequence.trno.as_ref())));
            debug!(trno = %text_or(&sequence.trno, ""), ?levels, "treatment");
            self.treatments.push(Treatment { sequence, levels });
        }
        Ok(())
    }

    fn add_sequence(
        &mut self,
        experiment: &Experiment,
        params: &ExperimentParams,
        j: usize,
        sequence: &Sequence,
    ) -> Result<Levels> {
        let seqid = text_or(&sequence.seqid, "");
        let root = experiment.root_for(j);
        let soil = experiment.soil_for(j);

        // field and composite soil
        let key = SoilKey::new(&root.field, &root.modifiers);
        let composite = self.soils.register(key.clone())?;

        let mut attrs = root.field.clone();
        attrs.soil_id = root.field.soil_id.as_ref().map(|_| Scalar::new(key.soil_id.clone()));
        attrs.sltx = soil.and_then(|s| s.sltx.clone()).or_else(|| root.field.sltx.clone());
        let field = FieldRecord {
            attrs,
            sldp: soil.and_then(|s| s.sldp.clone()),
            flhst: root.dssat_info.as_ref().and_then(|d| d.flhst.clone()),
            fhdur: root.dssat_info.as_ref().and_then(|d| d.fhdur.clone()),
            soil_id_composite: composite.clone(),
        };

        let mut ic = root.initial_conditions.clone().unwrap_or_default();
        ic.soil_id_composite = Some(composite);

        let environment: Vec<EnvModification> = experiment
            .environment
            .data
            .iter()
            .filter(|e| text_or(&e.em, "") == text_or(&sequence.em, ""))
            .map(|e| e.data.clone())
            .collect();

        let analysis = soil.and_then(SoilAnalysis::from_soil_data);

        let mut control = experiment
            .controls
            .data
            .iter()
            .find(|c| text_or(&c.sm, "") == text_or(&sequence.sm, ""))
            .map(|c| c.control.clone())
            .unwrap_or_default();
        if root.sdat.is_some() {
            control.sdat = root.sdat.clone();
        }

        let events = self.collect_events(experiment, params, seqid);
        if events.harvests.iter().any(Harvest::has_date) {
            control.hadat_valid = Some(Scalar::from("Y"));
        }

        let levels = Levels {
            cultivar: self.cultivars.intern(events.cultivar),
            field: self.fields.intern(field),
            soil_analysis: analysis.map_or(0, |a| self.soil_analyses.intern(a)),
            initial_conditions: self.initial_conditions.intern(ic),
            planting: self.plantings.intern(events.planting),
            irrigation: self.irrigations.intern(events.irrigations),
            fertilizer: self.fertilizers.intern(events.fertilizers),
            residues: self.residues.intern(events.residues),
            chemicals: self.chemicals.intern(events.chemicals),
            tillage: self.tillages.intern(events.tillages),
            environment: self.environments.intern(environment),
            harvest: self.harvests.intern(events.harvests),
            simulation: self.controls.intern(control).max(1),
        };
        Ok(levels)
    }

    fn collect_events(
        &mut self,
        experiment: &Experiment,
        params: &ExperimentParams,
        seqid: &str,
    ) -> SequenceEvents {
        let mut out = SequenceEvents::default();
        for event in experiment.events().iter().filter(|e| e.belongs_to(seqid)) {
            match &event.kind {
                EventKind::Planting(p) => {
                    self.add_planting(&mut out, p, params, seqid);
                }
                EventKind::Irrigation(e) => out.irrigations.push(e.clone()),
                EventKind::Fertilizer(e) => out.fertilizers.push(e.clone()),
                EventKind::OrganicMatter(e) => out.residues.push(e.clone()),
                EventKind::Chemical(e) => out.chemicals.push(e.clone()),
                EventKind::Tillage(e) => out.tillages.push(e.clone()),
                EventKind::Harvest(e) => out.harvests.push(e.clone()),
                EventKind::Other => {}
            }
        }
        out
    }

    fn add_planting(
        &mut self,
        out: &mut SequenceEvents,
        planting: &Planting,
        params: &ExperimentParams,
        seqid: &str,
    ) {
        let cu = &mut out.cultivar;
        let cultivar = params.cultivar_for(seqid);

        let generated = if self.options.generate_cultivars && !cultivar.is_empty() {
            self.coefficients.register(
                cultivar,
                params.ecotype_for(seqid),
                planting.crid.as_ref(),
            )
        } else {
            None
        };
        match generated {
            Some(id) => cu.cul_id = Some(Scalar::new(id)),
            None => {
                copy(&mut cu.cul_id, &planting.cul_id);
                copy(&mut cu.dssat_cul_id, &planting.dssat_cul_id);
            }
        }
        copy(&mut cu.cul_name, &planting.cul_name);
        copy(&mut cu.crid, &planting.crid);
        copy(&mut cu.rm, &planting.rm);
        copy(&mut cu.cul_notes, &planting.cul_notes);

        out.planting.overlay(&planting.details());
    }
}

fn copy(to: &mut Option<Scalar>, from: &Option<Scalar>) {
    if from.is_some() {
        *to = from.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SoilCatalog {
        SoilCatalog::from_json(
            r#"{"soils": [{"soil_id": "IB00000001", "soilLayer": [
                {"sllb": 10, "sloc": 1.2, "sdul": 0.3}
            ]}]}"#,
        )
        .unwrap()
    }

    fn experiments(json: &str) -> ExperimentSet {
        ExperimentSet::from_json(json).unwrap()
    }

    const TWO_SEQUENCES: &str = r#"{"experiments": [{
        "exname_o": "UFGA0001", "wst_id": "UFGA", "soil_id": "IB00000001",
        "dssat_sequence": {"data": [
            {"seqid": "1", "trno": "1", "sm": "1", "em": "1"},
            {"seqid": "2", "trno": "1000", "sm": "1"}
        ]},
        "management": {"events": [
            {"event": "planting", "seqid": "1", "date": "19950615", "crid": "MZ",
             "cul_id": "IB0001", "cul_name": "Generic", "plpop": "7"},
            {"event": "irrigation", "seqid": "1", "date": "19950701", "irval": "10"},
            {"event": "harvest", "seqid": "1", "date": "19951001"},
            {"event": "planting", "seqid": "2", "date": "19950615", "crid": "MZ",
             "cul_id": "IB0001", "cul_name": "Generic", "plpop": "7"},
            {"event": "mowing", "seqid": "2"}
        ]},
        "dssat_environment_modification": {"data": [
            {"em": "1", "data": {"odyer": "95", "eco2": "A50"}}
        ]},
        "dssat_simulation_control": {"data": [
            {"sm": "1", "general": {"nyers": "1"}}
        ]}
    }]}"#;

    #[test]
    fn test_levels_and_dedup() {
        let catalog = catalog();
        let set = experiments(TWO_SEQUENCES);
        let a = Assembly::build(&set, &catalog, AssemblyOptions::default()).unwrap();

        assert_eq!(a.treatments.len(), 2);
        let l1 = a.treatments[0].levels;
        let l2 = a.treatments[1].levels;
        assert_eq!(l1.as_array(), [1, 1, 0, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1]);
        // same cultivar, field, planting; no irrigation, harvest or environment,
        // and a control set without the harvest flag
        assert_eq!(l2.as_array(), [1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(a.cultivars.len(), 1);
        assert_eq!(a.fields.get(1).unwrap().soil_id_composite, "SL00000001");
        assert_eq!(a.treatments[1].sequence.trno.as_ref().unwrap().as_str(), "1");
    }

    #[test]
    fn test_control_gets_harvest_flag_and_sdat() {
        let catalog = catalog();
        let set = experiments(TWO_SEQUENCES);
        let a = Assembly::build(&set, &catalog, AssemblyOptions::default()).unwrap();
        let first = a.controls.get(1).unwrap();
        assert_eq!(first.hadat_valid.as_ref().unwrap().as_str(), "Y");
        assert!(first.general.is_some());
        let second = a.controls.get(2).unwrap();
        assert!(second.general.is_some());
        assert!(second.hadat_valid.is_none());
    }

    #[test]
    fn test_missing_control_points_at_first() {
        let catalog = catalog();
        let set = experiments(
            r#"{"experiments": [{"soil_id": "IB00000001",
                "dssat_sequence": {"data": [{"seqid": "1"}]}}]}"#,
        );
        let a = Assembly::build(&set, &catalog, AssemblyOptions::default()).unwrap();
        assert!(a.controls.is_empty());
        assert_eq!(a.treatments[0].levels.simulation, 1);
        assert_eq!(a.treatments[0].levels.cultivar, 0);
        assert_eq!(a.treatments[0].levels.planting, 0);
    }

    #[test]
    fn test_generated_cultivars() {
        let catalog = catalog();
        let set = experiments(
            r#"{"experiments": [{"soil_id": "IB00000001",
                "dssat_sequence": {"data": [{"seqid": "1"}, {"seqid": "2"}]},
                "management": {"events": [
                    {"event": "planting", "seqid": "1", "crid": "MZ", "cul_id": "IB0001"},
                    {"event": "planting", "seqid": "2", "crid": "MZ", "cul_id": "IB0001"}
                ]},
                "cultivar": [{"seqid": "1", "p1": 200}, {"seqid": "2", "p1": 200}],
                "cultivar_mods": [{"seqid": "2", "offset_p1": 20}],
                "ecotype": [{"seqid": "1", "tbase": 8}]}]}"#,
        );
        let options = AssemblyOptions {
            generate_cultivars: true,
            ..Default::default()
        };
        let a = Assembly::build(&set, &catalog, options).unwrap();
        assert_eq!(a.coefficients.cultivars().len(), 2);
        assert_eq!(a.coefficients.ecotypes().len(), 1);
        assert_eq!(a.cultivars.get(1).unwrap().cul_id.as_ref().unwrap().as_str(), "CC0000");
        assert_eq!(a.cultivars.get(2).unwrap().cul_id.as_ref().unwrap().as_str(), "CC0001");
        assert_eq!(a.coefficients.cultivars()[1].get("p1").unwrap().as_str(), "220.0");
        assert!(a.coefficients.cultivars()[1].get("eco").is_none());
    }

    #[test]
    fn test_unknown_soil_aborts() {
        let catalog = catalog();
        let set = experiments(
            r#"{"experiments": [{"soil_id": "NOPE000001",
                "dssat_sequence": {"data": [{"seqid": "1"}]}}]}"#,
        );
        assert!(Assembly::build(&set, &catalog, AssemblyOptions::default()).is_err());
    }

    #[test]
    fn test_soil_analysis_only_with_scs_group() {
        let with = SoilData {
            layers: vec![SoilDataLayer {
                sllb: Some(Scalar::from("10")),
                slsc: Some(Scalar::from("0.5")),
            }],
            ..Default::default()
        };
        assert!(SoilAnalysis::from_soil_data(&with).is_some());
        let without = SoilData {
            layers: vec![SoilDataLayer {
                sllb: Some(Scalar::from("10")),
                slsc: None,
            }],
            ..Default::default()
        };
        assert!(SoilAnalysis::from_soil_data(&without).is_none());
    }

    #[test]
    fn test_normalize_trno() {
        assert_eq!(normalize_trno(None), "1");
        assert_eq!(normalize_trno(Some(&Scalar::from("1"))), "1");
        assert_eq!(normalize_trno(Some(&Scalar::from("999"))), "999");
        assert_eq!(normalize_trno(Some(&Scalar::from("1000"))), "1");
        assert_eq!(normalize_trno(Some(&Scalar::from("0"))), "999");
        assert_eq!(normalize_trno(Some(&Scalar::from("12.0"))), "12");
        assert_eq!(normalize_trno(Some(&Scalar::from("abc"))), "abc");
    }
}
