//! Residues and organic fertilizer section

use super::{date, trailing_name};
use crate::model::OrganicMatter;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index2, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "@R RDATE  RCOD  RAMT  RESN  RESP  RESK  RINP  RDEP  RMET RENAME\n";

pub fn generate(table: &SectionTable<Vec<OrganicMatter>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let r5 = Col::real(5);

    let mut out = String::from("*RESIDUES AND ORGANIC FERTILIZER\n");
    out.push_str(HEADER);
    for (i, events) in table.iter() {
        for om in events {
            out.push_str(&index2(i));
            out.push_str(&date(DateFormat::Legacy, &om.date));
            out.push_str(&Col::text(5).field(&om.omcd, MISSING));
            for value in [
                &om.omamt, &om.omn_pct, &om.omp_pct, &om.omk_pct, &om.ominp, &om.omdep, &om.omacd,
            ] {
                out.push_str(&r5.field(value, MISSING));
            }
            out.push_str(&trailing_name(" ", &om.om_name));
        }
    }
    out.push('\n');
    out
}
