//! Initial conditions section
//!
//! Layer rows come from the composite soil: depth, a fraction of field
//! capacity as initial water (capped at 0.75) and organic carbon as
//! initial nitrate.

use tracing::warn;

use super::{date, trailing_name};
use crate::model::{text_or, InitialConditions};
use crate::soil::SoilRegistry;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const HEADER_Y2K: &str =
    "@C       PCR    ICDAT  ICRT  ICND  ICRN  ICRE  ICWD ICRES ICREN ICREP ICRIP ICRID ICNAME\n";
const HEADER_LEGACY: &str =
    "@C       PCR ICDAT  ICRT  ICND  ICRN  ICRE  ICWD ICRES ICREN ICREP ICRIP ICRID ICNAME\n";
const LAYER_HEADER: &str = "@C      ICBL  SH2O  SNH4  SNO3\n";

/// Upper bound of the initial soil water content.
pub const MAX_INITIAL_WATER: f64 = 0.75;
pub const DEFAULT_FRAC_FULL: f64 = 0.5;

pub fn generate(
    table: &SectionTable<InitialConditions>,
    soils: &SoilRegistry,
    dates: DateFormat,
) -> String {
    if table.is_empty() {
        return String::new();
    }
    let r5 = Col::real(5);

    let mut out = String::from("*INITIAL CONDITIONS\n");
    for (i, ic) in table.iter() {
        let v = &ic.values;
        out.push_str(match dates {
            DateFormat::Extended => HEADER_Y2K,
            DateFormat::Legacy => HEADER_LEGACY,
        });
        out.push_str(&index7(i));
        out.push_str(&Col::text(5).lead(0).field(&v.icpcr, MISSING));
        out.push_str(&date(dates, &v.icdat));
        for value in [&v.icrt, &v.icnd, &v.icrz_no, &v.icrze, &v.icwt, &v.icrag] {
            out.push_str(&r5.field(value, MISSING));
        }
        out.push_str(&r5.dec(2).field(&v.icrn, MISSING));
        out.push_str(&r5.dec(2).field(&v.icrp, MISSING));
        out.push_str(&r5.field(&v.icrip, MISSING));
        out.push_str(&r5.field(&v.icrdp, MISSING));
        out.push_str(&trailing_name(" ", &v.ic_name));

        let icnh4 = match &v.icnh4 {
            Some(value) => value.as_str(),
            None => ic.layers.first().map_or(MISSING, |l| text_or(&l.icnh4, MISSING)),
        };
        let frac_full = match &v.frac_full {
            Some(f) => f.as_f64().unwrap_or_else(|| {
                warn!(frac_full = %f, "frac_full is not numeric, using default");
                DEFAULT_FRAC_FULL
            }),
            None => DEFAULT_FRAC_FULL,
        };

        let composite = ic.soil_id_composite.as_deref().unwrap_or(MISSING);
        let layers = soils.ic_layers(composite);
        if !layers.is_empty() {
            out.push_str(LAYER_HEADER);
        }
        for layer in layers {
            let ich2o = layer
                .ich2o
                .as_ref()
                .and_then(|s| s.as_f64())
                .unwrap_or(-99.0);
            let water = (frac_full * ich2o).min(MAX_INITIAL_WATER);
            out.push_str(&index7(i));
            out.push_str(&r5.lead(0).field(&layer.icbl, MISSING));
            out.push_str(&r5.dec(3).num(water));
            out.push_str(&Col::text(5).fmt(icnh4));
            out.push_str(&r5.dec(1).field(&layer.icno3, MISSING));
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldAttrs, IcLayer, IcValues, Scalar, SoilModifiers};
    use crate::soil::{SoilCatalog, SoilKey};

    fn catalog() -> SoilCatalog {
        SoilCatalog::from_json(
            r#"{"soils": [{"soil_id": "IB00000001", "soilLayer": [
                {"sllb": 5, "sloc": 1.2, "sdul": 0.3},
                {"sllb": 30, "sloc": 0.4, "sdul": 1.8}
            ]}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_conditions_with_layers() {
        let catalog = catalog();
        let mut soils = SoilRegistry::new(&catalog, false);
        let field = FieldAttrs {
            soil_id: Some(Scalar::from("IB00000001")),
            ..Default::default()
        };
        let id = soils.register(SoilKey::new(&field, &SoilModifiers::default())).unwrap();

        let mut table = SectionTable::new("initial conditions");
        table.intern(InitialConditions {
            values: IcValues {
                icdat: Some(Scalar::from("19950601")),
                icpcr: Some(Scalar::from("MZ")),
                ..Default::default()
            },
            layers: vec![IcLayer {
                icnh4: Some(Scalar::from("0.5")),
                ..Default::default()
            }],
            soil_id_composite: Some(id),
        });

        let text = generate(&table, &soils, DateFormat::Extended);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], HEADER_Y2K.trim_end());
        assert!(lines[2].starts_with("1         MZ  1995152   -99"));
        assert!(lines[2].ends_with(" -99"));
        assert_eq!(lines[3], LAYER_HEADER.trim_end());
        assert_eq!(lines[4], "1          5 0.150   0.5   1.2");
        // 0.5 * 1.8 is capped
        assert_eq!(lines[5], "1         30 0.750   0.5   0.4");
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_legacy_date_column() {
        let catalog = catalog();
        let soils = SoilRegistry::new(&catalog, false);
        let mut table = SectionTable::new("initial conditions");
        table.intern(InitialConditions {
            values: IcValues {
                icdat: Some(Scalar::from("19950601")),
                ..Default::default()
            },
            layers: Vec::new(),
            soil_id_composite: Some("SL00000009".to_string()),
        });
        let text = generate(&table, &soils, DateFormat::Legacy);
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("1        -99 95152   -99"));
        assert!(!text.contains(LAYER_HEADER));
    }
}
