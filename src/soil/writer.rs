//! Soil file (SOL) writer
//!
//! One block per composite soil: profile header, site line, surface line,
//! one texture/hydraulic line per layer and, unless `null_out_vars` is set,
//! one chemistry line per layer. Blocks are separated by a blank line.

use super::catalog::{Attributes, SoilLayer};
use super::pedotransfer::swc_adjustment;
use super::registry::{CompositeSoil, LayerValues, SoilKey, SoilRegistry};
use crate::model::Scalar;
use crate::utils::format::{Col, MISSING};

const SITE_HEADER: &str = "@SITE        COUNTRY          LAT     LONG SCS FAMILY";
const SURFACE_HEADER: &str = "@ SCOM  SALB  SLU1  SLDR  SLRO  SLNF  SLPF  SMHB  SMPX  SMKE";
const LAYER_HEADER: &str = "@  SLB  SLMH  SLLL  SDUL  SSAT  SRGF  SSKS  SBDM  SLOC  SLCL  SLSI  SLCF  SLNI  SLHW  SLHB  SCEC  SADC";
const CHEMISTRY_HEADER: &str = "@  SLB  SLPX  SLPT  SLPO CACO3  SLAL  SLFE  SLMN  SLBS  SLPA  SLPB  SLKE  SLMG  SLNA  SLSU  SLEC  SLCA";

const CHEMISTRY_COLUMNS: [&str; 16] = [
    "slpx", "slpt", "slpo", "caco3", "slal", "slfe", "slmn", "slbs", "slpa", "slpb", "slke",
    "slmg", "slna", "slsu", "slec", "slca",
];

const R5: Col = Col::real(5);
const T5: Col = Col::text(5);

/// Render the soil file for every registered composite soil.
pub fn generate(registry: &SoilRegistry) -> String {
    registry
        .soils()
        .iter()
        .map(|soil| generate_profile(soil, registry.use_ptransfer()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn number_or_missing(text: &str) -> f64 {
    text.trim().parse().unwrap_or(-99.0)
}

/// One profile block.
pub fn generate_profile(soil: &CompositeSoil, use_ptransfer: bool) -> String {
    let attrs = &soil.profile.attrs;
    let key = &soil.key;
    let mut out = String::new();

    // profile header
    out.push('*');
    out.push_str(&Col::text(10).lead(0).left().fmt(&soil.id));
    out.push_str(&Col::text(11).lead(2).left().fmt(attrs.get("sl_source")));
    out.push_str(&T5.left().fmt(attrs.get("sltx")));
    out.push_str(&R5.fmt(attrs.get("sldp")));
    out.push_str(&Col::text(50).left().fmt(attrs.get("soil_name")));
    out.push('\n');

    out.push_str(SITE_HEADER);
    out.push('\n');
    out.push_str(&generate_site(attrs));
    out.push('\n');

    out.push_str(SURFACE_HEADER);
    out.push('\n');
    out.push_str(&generate_surface(attrs, key));
    out.push('\n');

    out.push_str(LAYER_HEADER);
    out.push('\n');
    for layer in &soil.profile.layers {
        out.push_str(&generate_layer(layer, key, use_ptransfer));
        out.push('\n');
    }

    if !key.null_out() {
        out.push_str(CHEMISTRY_HEADER);
        out.push('\n');
        let rows: Vec<String> = soil.profile.layers.iter().map(generate_chemistry).collect();
        out.push_str(&rows.join("\n"));
    }

    out
}

fn generate_site(attrs: &Attributes) -> String {
    let loc = Col::text(11).left();
    let coord = Col::real(8).dec(3);
    [
        loc.fmt(attrs.get("sl_loc_3")),
        loc.fmt(attrs.get("sl_loc_1")),
        coord.fmt(attrs.get("lat")),
        coord.fmt(attrs.get("lon")),
        Col::text(50).left().fmt(attrs.get("classification")),
    ]
    .concat()
}

fn generate_surface(attrs: &Attributes, key: &SoilKey) -> String {
    let sldr = match SoilKey::bound(&key.sldr_min) {
        Some(min) => R5.dec(2).num(number_or_missing(attrs.get("sldr")).max(min)),
        None => R5.dec(2).fmt(attrs.get("sldr")),
    };
    let slro = match SoilKey::bound(&key.slro_max) {
        Some(max) => R5.num(number_or_missing(attrs.get("slro")).min(max)),
        None => R5.fmt(attrs.get("slro")),
    };
    let slpf = if key.slpf != MISSING {
        R5.dec(2).fmt(&key.slpf)
    } else {
        R5.dec(2).fmt(attrs.get("slpf"))
    };

    [
        T5.fmt(attrs.get("sscol")),
        R5.dec(2).fmt(attrs.get("salb")),
        R5.fmt(attrs.get("slu1")),
        sldr,
        slro,
        R5.dec(2).fmt(attrs.get("slnf")),
        slpf,
        T5.left().fmt(attrs.get("smhb")),
        T5.left().fmt(attrs.get("smpx")),
        T5.left().fmt(attrs.get("smke")),
    ]
    .concat()
}

/// Texture and hydraulic line of one layer.
pub fn generate_layer(layer: &SoilLayer, key: &SoilKey, use_ptransfer: bool) -> String {
    let attrs = &layer.attrs;
    let mut v = LayerValues::derive(attrs, key, use_ptransfer);

    if let Some(delta) = SoilKey::bound(&key.delta_swc) {
        let w = swc_adjustment(
            number_or_missing(v.sdul.as_str()),
            number_or_missing(v.slll.as_str()),
            number_or_missing(v.ssat.as_str()),
            delta,
        );
        v.sdul = Scalar::number(w.sdul);
        v.slll = Scalar::number(w.slll);
        v.ssat = Scalar::number(w.ssat);
    }

    let mut slhw = R5.dec(1).fmt(attrs.get("slhw"));
    if key.slhw != MISSING {
        slhw = R5.dec(1).fmt(&key.slhw);
    }
    if let Some(min) = SoilKey::bound(&key.slhw_min) {
        slhw = R5.dec(1).num(number_or_missing(&slhw).max(min));
    }

    let ssks = R5.dec(1).num(number_or_missing(v.ssks.as_str()).max(0.1));

    let (slni, scec) = if key.null_out() {
        (R5.fmt(MISSING), R5.fmt(MISSING))
    } else {
        (R5.dec(2).fmt(attrs.get("slni")), R5.dec(1).fmt(attrs.get("scec")))
    };

    [
        R5.fmt(attrs.get("sllb")),
        T5.left().fmt(attrs.get("slmh")),
        R5.dec(3).fmt(v.slll.as_str()),
        R5.dec(3).fmt(v.sdul.as_str()),
        R5.dec(3).fmt(v.ssat.as_str()),
        R5.dec(2).fmt(attrs.get("srgf")),
        ssks,
        R5.dec(2).fmt(v.sbdm.as_str()),
        R5.dec(2).fmt(v.oc.as_str()),
        R5.dec(1).fmt(v.clay.as_str()),
        R5.dec(1).fmt(v.silt.as_str()),
        R5.dec(1).fmt(v.cf.as_str()),
        slni,
        slhw,
        R5.dec(1).fmt(attrs.get("sphb")),
        scec,
        R5.dec(1).fmt(attrs.get("sadc")),
    ]
    .concat()
}

fn generate_chemistry(layer: &SoilLayer) -> String {
    let attrs = &layer.attrs;
    let mut row = R5.fmt(attrs.get("sllb"));
    for name in CHEMISTRY_COLUMNS {
        row.push_str(&R5.dec(1).fmt(attrs.get(name)));
    }
    row
}
