//! Harvest details section

use super::{date, trailing_name};
use crate::model::Harvest;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "@H      HDATE  HSTG  HCOM HSIZE   HPC  HBPC HNAME\n";

pub fn generate(table: &SectionTable<Vec<Harvest>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let code = Col::text(5).left();
    let c5 = Col::text(5);

    let mut out = String::from("*HARVEST DETAILS\n");
    out.push_str(HEADER);
    for (i, events) in table.iter() {
        for h in events {
            out.push_str(&index7(i));
            out.push_str(&date(DateFormat::Legacy, &h.date));
            out.push_str(&code.field(&h.hastg, MISSING));
            out.push_str(&code.field(&h.hacom, MISSING));
            out.push_str(&code.field(&h.hasiz, MISSING));
            out.push_str(&c5.field(&h.hap_pct, MISSING));
            out.push_str(&c5.field(&h.hab_pct, MISSING));
            out.push_str(&trailing_name(" ", &h.ha_name));
        }
    }
    out.push('\n');
    out
}
