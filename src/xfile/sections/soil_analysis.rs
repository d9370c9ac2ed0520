//! Soil analysis section
//!
//! Only the layer depth and SCS group are known; every other analysis
//! column is written as missing.

use crate::assembler::SoilAnalysis;
use crate::utils::format::{index2, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "@A SADAT  SMHB  SMPX  SMKE  SANAME\n";
const LAYER_HEADER: &str = "@A  SABL  SADM  SAOC  SANI SAPHW SAPHB  SAPX  SAKE  SASC\n";

pub fn generate(table: &SectionTable<SoilAnalysis>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let r5 = Col::real(5);
    let t5 = Col::text(5);

    let mut out = String::from("*SOIL ANALYSIS\n");
    for (i, sa) in table.iter() {
        out.push_str(HEADER);
        out.push_str(&index2(i));
        out.push_str(&r5.field(&sa.sadat, MISSING));
        for _ in 0..3 {
            out.push_str(&t5.fmt(MISSING));
        }
        out.push(' ');
        out.push_str(MISSING);
        out.push('\n');

        if !sa.layers.is_empty() {
            out.push_str(LAYER_HEADER);
        }
        for layer in &sa.layers {
            out.push_str(&index2(i));
            out.push_str(&r5.field(&layer.sllb, MISSING));
            for decimals in [1, 2, 2, 1, 1, 1, 1] {
                out.push_str(&r5.dec(decimals).fmt(MISSING));
            }
            out.push_str(&r5.field(&layer.slsc, MISSING));
            out.push('\n');
        }
    }
    out
}
