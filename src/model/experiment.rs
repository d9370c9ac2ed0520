//! Experiment records
//!
//! Top-level experiment document (`{"experiments": [...]}`), root field
//! attributes, soil modifiers, sequences and the per-sequence soil and
//! initial-condition blocks.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use super::control::ControlEntry;
use super::events::Event;
use super::params::ParamSet;
use crate::error::{Result, TranslateError};

record! {
    /// Experiment-level metadata, read from the first experiment only.
    pub struct ExperimentMeta {
        exname_o: "exname_o",
        local_name: "local_name",
        person_notes: "person_notes",
        institution: "institution",
        site_name: "site_name",
        tr_notes: "tr_notes",
        plta: "plta",
        pltr_no: "pltr#",
        pltln: "pltln",
        pldr: "pldr",
        pltsp: "pltsp",
        pllay: "pllay",
        pltha: "pltha",
        plth_no: "plth#",
        plthl: "plthl",
        plthm: "plthm",
    }
}

impl ExperimentMeta {
    /// True when any plot attribute is present and non-empty.
    pub fn has_plot(&self) -> bool {
        [
            &self.plta,
            &self.pltr_no,
            &self.pltln,
            &self.pldr,
            &self.pltsp,
            &self.pllay,
            &self.pltha,
            &self.plth_no,
            &self.plthl,
            &self.plthm,
        ]
        .iter()
        .any(|v| v.as_ref().is_some_and(|s| !s.is_empty()))
    }
}

record! {
    /// Field attributes of a root field.
    pub struct FieldAttrs {
        id_field: "id_field",
        wst_id: "wst_id",
        flsl: "flsl",
        flob: "flob",
        fl_drntype: "fl_drntype",
        fldrd: "fldrd",
        fldrs: "fldrs",
        flst: "flst",
        sltx: "sltx",
        soil_id: "soil_id",
        fl_name: "fl_name",
        fl_lat: "fl_lat",
        fl_long: "fl_long",
        flele: "flele",
        farea: "farea",
        fllwr: "fllwr",
        flsla: "flsla",
    }
}

record! {
    /// Per-experiment soil modifiers. Together with the soil id they make up
    /// the composite soil key.
    pub struct SoilModifiers {
        delta_cly: "delta_cly",
        delta_swc: "delta_swc",
        slpf: "slpf",
        sldr_min: "sldr_min",
        slro_max: "slro_max",
        null_out_vars: "null_out_vars",
        slsnd_max: "slsnd_max",
        sloc_min: "sloc_min",
        slhw: "slhw",
        slhw_min: "slhw_min",
    }
}

record! {
    pub struct DssatInfo {
        flhst: "flhst",
        fhdur: "fhdur",
    }
}

record! {
    /// Scalar part of an initial-conditions block.
    pub struct IcValues {
        icdat: "icdat",
        icpcr: "icpcr",
        icrt: "icrt",
        icnd: "icnd",
        icrz_no: "icrz#",
        icrze: "icrze",
        icwt: "icwt",
        icrag: "icrag",
        icrn: "icrn",
        icrp: "icrp",
        icrip: "icrip",
        icrdp: "icrdp",
        ic_name: "ic_name",
        icnh4: "icnh4",
        frac_full: "frac_full",
    }
}

record! {
    pub struct IcLayer {
        icbl: "icbl",
        ich2o: "ich2o",
        icnh4: "icnh4",
        icno3: "icno3",
    }
}

/// Initial conditions of a root field, tagged with its composite soil id
/// once the field has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    #[serde(flatten)]
    pub values: IcValues,
    #[serde(rename = "soilLayer")]
    pub layers: Vec<IcLayer>,
    #[serde(skip)]
    pub soil_id_composite: Option<String>,
}

impl crate::xref::Record for InitialConditions {
    fn is_blank(&self) -> bool {
        self.values.is_blank() && self.layers.is_empty() && self.soil_id_composite.is_none()
    }
}

/// One root field: the experiment itself or an entry of `dssat_root`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RootField {
    #[serde(flatten)]
    pub field: FieldAttrs,
    #[serde(flatten)]
    pub modifiers: SoilModifiers,
    pub sdat: Option<super::Scalar>,
    pub dssat_info: Option<DssatInfo>,
    pub initial_conditions: Option<InitialConditions>,
}

record! {
    /// One simulated treatment.
    pub struct Sequence {
        seqid: "seqid",
        em: "em",
        sm: "sm",
        trno: "trno",
        sq: "sq",
        op: "op",
        co: "co",
        trt_name: "trt_name",
    }
}

record! {
    pub struct SoilDataLayer {
        sllb: "sllb",
        slsc: "slsc",
    }
}

/// Experiment-side soil data: texture class, depth and analysed layers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SoilData {
    pub sltx: Option<super::Scalar>,
    pub sldp: Option<super::Scalar>,
    pub sadat: Option<super::Scalar>,
    #[serde(rename = "soilLayer")]
    pub layers: Vec<SoilDataLayer>,
}

record! {
    /// One environment modification row.
    pub struct EnvModification {
        odyer: "odyer",
        odday: "odday",
        eday: "eday",
        erad: "erad",
        emax: "emax",
        emin: "emin",
        erain: "erain",
        eco2: "eco2",
        edew: "edew",
        ewind: "ewind",
        envnam: "envnam",
    }
}

/// Environment modification keyed by its symbolic `em` id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvEntry {
    pub em: Option<super::Scalar>,
    pub data: EnvModification,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataBlock<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for DataBlock<T> {
    fn default() -> Self {
        DataBlock { data: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Management {
    pub events: Vec<Event>,
}

/// One experiment record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Experiment {
    #[serde(flatten)]
    pub meta: ExperimentMeta,
    #[serde(flatten)]
    pub root: RootField,
    #[serde(rename = "dssat_sequence")]
    pub sequence: DataBlock<Sequence>,
    pub management: Management,
    #[serde(rename = "dssat_root")]
    pub roots: Vec<RootField>,
    #[serde(rename = "dssat_environment_modification")]
    pub environment: DataBlock<EnvEntry>,
    #[serde(rename = "dssat_simulation_control")]
    pub controls: DataBlock<ControlEntry>,
    #[serde(deserialize_with = "one_or_many")]
    pub soil: Vec<Option<SoilData>>,
    pub cultivar: Vec<ParamSet>,
    pub cultivar_mods: Vec<ParamSet>,
    pub ecotype: Vec<ParamSet>,
    pub ecotype_mods: Vec<ParamSet>,
}

impl Experiment {
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequence.data
    }

    pub fn events(&self) -> &[Event] {
        &self.management.events
    }

    /// Root field of sequence `j`: `dssat_root[j]` when present, else the
    /// experiment itself.
    pub fn root_for(&self, j: usize) -> &RootField {
        self.roots.get(j).unwrap_or(&self.root)
    }

    /// Soil data of sequence `j`: `soil[j]`, else `soil[0]`, else none.
    pub fn soil_for(&self, j: usize) -> Option<&SoilData> {
        match self.soil.get(j) {
            Some(entry) => entry.as_ref(),
            None => self.soil.first().and_then(|s| s.as_ref()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Option<SoilData>>),
    One(SoilData),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<SoilData>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(list)) => list,
        Some(OneOrMany::One(one)) => vec![Some(one)],
        None => Vec::new(),
    })
}

/// Experiment document as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperimentSet {
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl ExperimentSet {
    /// Parse an experiment document. An empty experiment list is fatal.
    pub fn from_json(text: &str) -> Result<Self> {
        let set: ExperimentSet = serde_json::from_str(text)?;
        if set.experiments.is_empty() {
            return Err(TranslateError::MissingInput("no experiment data".to_string()));
        }
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            TranslateError::MissingInput(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_modifiers_flatten() {
        let exp: Experiment = serde_json::from_str(
            r#"{"exname_o": "TEST0001", "wst_id": "GENE", "soil_id": "IB00000001",
                "delta_cly": 5, "sdat": "19800101",
                "initial_conditions": {"icdat": "19800101", "soilLayer": [{"icnh4": "0.5"}]}}"#,
        )
        .unwrap();
        assert_eq!(exp.meta.exname_o.as_ref().unwrap().as_str(), "TEST0001");
        assert_eq!(exp.root.field.wst_id.as_ref().unwrap().as_str(), "GENE");
        assert_eq!(exp.root.modifiers.delta_cly.as_ref().unwrap().as_str(), "5");
        assert_eq!(exp.root.sdat.as_ref().unwrap().as_str(), "19800101");
        let ic = exp.root.initial_conditions.as_ref().unwrap();
        assert_eq!(ic.layers.len(), 1);
        assert_eq!(ic.values.icdat.as_ref().unwrap().as_str(), "19800101");
    }

    #[test]
    fn test_soil_object_or_list() {
        let one: Experiment = serde_json::from_str(r#"{"soil": {"sltx": "SL"}}"#).unwrap();
        assert_eq!(one.soil.len(), 1);
        assert_eq!(one.soil_for(3).unwrap().sltx.as_ref().unwrap().as_str(), "SL");

        let many: Experiment =
            serde_json::from_str(r#"{"soil": [{"sltx": "SL"}, null]}"#).unwrap();
        assert!(many.soil_for(1).is_none());
        assert_eq!(many.soil_for(2).unwrap().sltx.as_ref().unwrap().as_str(), "SL");

        let none: Experiment = serde_json::from_str(r#"{"soil": null}"#).unwrap();
        assert!(none.soil_for(0).is_none());
    }

    #[test]
    fn test_root_for_falls_back_to_experiment() {
        let exp: Experiment = serde_json::from_str(
            r#"{"wst_id": "EXPT", "dssat_root": [{"wst_id": "ROOT"}]}"#,
        )
        .unwrap();
        assert_eq!(exp.root_for(0).field.wst_id.as_ref().unwrap().as_str(), "ROOT");
        assert_eq!(exp.root_for(1).field.wst_id.as_ref().unwrap().as_str(), "EXPT");
    }

    #[test]
    fn test_empty_experiment_list_is_fatal() {
        let err = ExperimentSet::from_json(r#"{"experiments": []}"#).unwrap_err();
        assert!(matches!(err, TranslateError::MissingInput(_)));
    }
}
