//! Composite soil identities
//!
//! A composite soil is a soil profile plus the experiment's soil modifiers.
//! Every distinct combination gets its own `SLnnnnnnnn` id in first-seen
//! order and its own block in the soil file. On first sight the profile is
//! resolved against the soil source and the initial-condition layers
//! (depth, field capacity, organic carbon) are derived.

use tracing::warn;

use super::catalog::{is_missing, Attributes, SoilCatalog, SoilProfile};
use super::pedotransfer::{ptransfer, redistribute_texture};
use crate::error::{Result, TranslateError};
use crate::model::{FieldAttrs, IcLayer, Scalar, SoilModifiers};
use crate::utils::format::MISSING;
use crate::xref::{Record, SectionTable};

/// Placeholder used when a root field names no soil.
pub const UNKNOWN_SOIL_ID: &str = "XY01234567";

/// Soil id plus the modifier tuple, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoilKey {
    pub soil_id: String,
    pub delta_cly: String,
    pub delta_swc: String,
    pub slpf: String,
    pub sldr_min: String,
    pub slro_max: String,
    pub null_out_vars: String,
    pub slsnd_max: String,
    pub sloc_min: String,
    pub slhw: String,
    pub slhw_min: String,
}

impl Record for SoilKey {
    fn is_blank(&self) -> bool {
        false
    }
}

fn or_missing(value: &Option<Scalar>) -> String {
    value.as_ref().map(|s| s.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// Soil id as written to the field table: ids longer than ten characters
/// are cut at their first underscore.
pub fn normalize_soil_id(soil_id: &str) -> String {
    if soil_id.len() > 10 {
        if let Some(i) = soil_id.find('_') {
            return soil_id[..i].to_string();
        }
    }
    soil_id.to_string()
}

impl SoilKey {
    pub fn new(field: &FieldAttrs, modifiers: &SoilModifiers) -> Self {
        let soil_id = match &field.soil_id {
            Some(id) => normalize_soil_id(id.as_str()),
            None => {
                warn!("field has no soil_id, using {}", UNKNOWN_SOIL_ID);
                UNKNOWN_SOIL_ID.to_string()
            }
        };
        SoilKey {
            soil_id,
            delta_cly: modifiers
                .delta_cly
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "0".to_string()),
            delta_swc: or_missing(&modifiers.delta_swc),
            slpf: or_missing(&modifiers.slpf),
            sldr_min: or_missing(&modifiers.sldr_min),
            slro_max: or_missing(&modifiers.slro_max),
            null_out_vars: or_missing(&modifiers.null_out_vars),
            slsnd_max: or_missing(&modifiers.slsnd_max),
            sloc_min: or_missing(&modifiers.sloc_min),
            slhw: or_missing(&modifiers.slhw),
            slhw_min: or_missing(&modifiers.slhw_min),
        }
    }

    /// Numeric modifier, `None` when not set.
    pub fn bound(value: &str) -> Option<f64> {
        if value == MISSING {
            None
        } else {
            value.trim().parse().ok()
        }
    }

    pub fn delta_cly(&self) -> f64 {
        self.delta_cly.trim().parse().unwrap_or(0.0)
    }

    /// `null_out_vars` nulls SLNI / SCEC and drops the chemistry lines.
    pub fn null_out(&self) -> bool {
        matches!(self.null_out_vars.as_str(), "True" | "true")
    }
}

/// Texture and hydraulic values of one layer after modifiers and, when
/// enabled, pedotransfer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerValues {
    pub clay: Scalar,
    pub silt: Scalar,
    pub oc: Scalar,
    pub cf: Scalar,
    pub slll: Scalar,
    pub sdul: Scalar,
    pub ssat: Scalar,
    pub ssks: Scalar,
    pub sbdm: Scalar,
    /// True when the hydraulic values came from pedotransfer.
    pub derived: bool,
}

impl LayerValues {
    pub fn derive(layer: &Attributes, key: &SoilKey, use_ptransfer: bool) -> Self {
        let raw = |name: &str| Scalar::from(layer.get(name));

        let mut oc = raw("sloc");
        if let Some(min) = SoilKey::bound(&key.sloc_min) {
            let current = oc.as_f64().unwrap_or(-99.0);
            oc = Scalar::number(current.max(min));
        }

        let texture = (
            layer.number("slcl"),
            layer.number("slsi"),
            if is_missing(oc.as_str()) { None } else { oc.as_f64() },
            layer.number("slcf"),
        );

        match texture {
            (Some(clay), Some(silt), Some(oc_value), Some(cf)) if use_ptransfer => {
                let (clay, silt) = redistribute_texture(
                    clay,
                    silt,
                    key.delta_cly(),
                    SoilKey::bound(&key.slsnd_max),
                );
                let h = ptransfer(clay, silt, oc_value, cf);
                LayerValues {
                    clay: Scalar::number(clay),
                    silt: Scalar::number(silt),
                    oc,
                    cf: raw("slcf"),
                    slll: Scalar::number(h.slll),
                    sdul: Scalar::number(h.sdul),
                    ssat: Scalar::number(h.ssat),
                    ssks: Scalar::number(h.sksat),
                    sbdm: Scalar::number(h.sbdm),
                    derived: true,
                }
            }
            _ => LayerValues {
                clay: raw("slcl"),
                silt: raw("slsi"),
                oc,
                cf: raw("slcf"),
                slll: raw("slll"),
                sdul: raw("sdul"),
                ssat: raw("ssat"),
                ssks: raw("ssks"),
                sbdm: raw("sbdm"),
                derived: false,
            },
        }
    }
}

/// A registered composite soil.
#[derive(Debug, Clone)]
pub struct CompositeSoil<'a> {
    pub id: String,
    pub key: SoilKey,
    pub profile: &'a SoilProfile,
    pub ic_layers: Vec<IcLayer>,
}

/// First-seen registry of composite soils for one translation.
pub struct SoilRegistry<'a> {
    catalog: &'a SoilCatalog,
    use_ptransfer: bool,
    keys: SectionTable<SoilKey>,
    soils: Vec<CompositeSoil<'a>>,
}

/// Composite id for a 1-based registry index.
pub fn composite_id(index: usize) -> String {
    format!("SL{:08}", index)
}

impl<'a> SoilRegistry<'a> {
    pub fn new(catalog: &'a SoilCatalog, use_ptransfer: bool) -> Self {
        SoilRegistry {
            catalog,
            use_ptransfer,
            keys: SectionTable::new("soil"),
            soils: Vec::new(),
        }
    }

    /// Composite id of `key`, registering it on first sight.
    ///
    /// Fails when the soil id is not in the soil source.
    pub fn register(&mut self, key: SoilKey) -> Result<String> {
        if let Some(index) = self.keys.position(&key) {
            return Ok(self.soils[index - 1].id.clone());
        }
        let catalog = self.catalog;
        let profile = catalog
            .get(&key.soil_id)
            .ok_or_else(|| TranslateError::SoilLookupFailure(key.soil_id.clone()))?;

        let index = self.keys.intern(key.clone());
        let id = composite_id(index);

        let ic_layers = profile
            .layers
            .iter()
            .map(|layer| {
                let values = LayerValues::derive(&layer.attrs, &key, self.use_ptransfer);
                IcLayer {
                    icbl: Some(Scalar::from(layer.attrs.get("sllb"))),
                    ich2o: Some(values.sdul),
                    icnh4: None,
                    icno3: Some(Scalar::from(layer.attrs.get("sloc"))),
                }
            })
            .collect();

        self.soils.push(CompositeSoil {
            id: id.clone(),
            key,
            profile,
            ic_layers,
        });
        Ok(id)
    }

    /// Initial-condition layers of a composite id.
    pub fn ic_layers(&self, composite_id: &str) -> &[IcLayer] {
        self.soils
            .iter()
            .find(|s| s.id == composite_id)
            .map(|s| s.ic_layers.as_slice())
            .unwrap_or(&[])
    }

    /// Registered soils in id order.
    pub fn soils(&self) -> &[CompositeSoil<'a>] {
        &self.soils
    }

    pub fn use_ptransfer(&self) -> bool {
        self.use_ptransfer
    }

    pub fn len(&self) -> usize {
        self.soils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.soils.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SoilCatalog {
        SoilCatalog::from_json(
            r#"{"soils": [
                {"soil_id": "IB00000001", "soilLayer": [
                    {"sllb": 5, "slcl": 20, "slsi": 40, "sloc": 1.0, "slcf": 0, "sdul": 0.3},
                    {"sllb": 15, "slcl": 20, "slsi": 40, "sloc": -99, "slcf": 0, "sdul": 0.28}
                ]},
                {"soil_id": "IB00000002", "soilLayer": [{"sllb": 10, "sdul": 0.25}]}
            ]}"#,
        )
        .unwrap()
    }

    fn key(soil_id: &str, delta_cly: Option<&str>) -> SoilKey {
        let field = FieldAttrs {
            soil_id: Some(Scalar::from(soil_id)),
            ..Default::default()
        };
        let modifiers = SoilModifiers {
            delta_cly: delta_cly.map(Scalar::from),
            ..Default::default()
        };
        SoilKey::new(&field, &modifiers)
    }

    #[test]
    fn test_composite_ids_are_first_seen() {
        let catalog = catalog();
        let mut registry = SoilRegistry::new(&catalog, false);
        let a = registry.register(key("IB00000001", None)).unwrap();
        let b = registry.register(key("IB00000002", None)).unwrap();
        let c = registry.register(key("IB00000001", Some("5"))).unwrap();
        let a2 = registry.register(key("IB00000001", Some("0"))).unwrap();
        assert_eq!(a, "SL00000001");
        assert_eq!(b, "SL00000002");
        assert_eq!(c, "SL00000003");
        assert_eq!(a2, a);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_unknown_profile_is_fatal() {
        let catalog = catalog();
        let mut registry = SoilRegistry::new(&catalog, false);
        let err = registry.register(key("NOPE000001", None)).unwrap_err();
        assert!(matches!(err, TranslateError::SoilLookupFailure(id) if id == "NOPE000001"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ic_layers_from_source_values() {
        let catalog = catalog();
        let mut registry = SoilRegistry::new(&catalog, false);
        let id = registry.register(key("IB00000001", None)).unwrap();
        let layers = registry.ic_layers(&id);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].icbl.as_ref().unwrap().as_str(), "5");
        assert_eq!(layers[0].ich2o.as_ref().unwrap().as_str(), "0.3");
        assert_eq!(layers[0].icno3.as_ref().unwrap().as_str(), "1.0");
    }

    #[test]
    fn test_ic_layers_from_pedotransfer() {
        let catalog = catalog();
        let mut registry = SoilRegistry::new(&catalog, true);
        let id = registry.register(key("IB00000001", None)).unwrap();
        let layers = registry.ic_layers(&id);
        let sdul = layers[0].ich2o.as_ref().unwrap().as_f64().unwrap();
        approx::assert_relative_eq!(sdul, 0.26323745902080004, epsilon = 1e-12);
        // missing organic carbon keeps the stored value
        assert_eq!(layers[1].ich2o.as_ref().unwrap().as_str(), "0.28");
    }

    #[test]
    fn test_long_soil_ids_are_cut() {
        assert_eq!(normalize_soil_id("IB00000001_extra"), "IB00000001");
        assert_eq!(normalize_soil_id("IB_0001"), "IB_0001");
        let k = SoilKey::new(&FieldAttrs::default(), &SoilModifiers::default());
        assert_eq!(k.soil_id, UNKNOWN_SOIL_ID);
        assert_eq!(k.delta_cly, "0");
        assert_eq!(k.slpf, "-99");
    }
}
