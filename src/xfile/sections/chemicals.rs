//! Chemical applications section

use super::{date, trailing_name};
use crate::model::Chemical;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index2, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "@C CDATE CHCOD CHAMT  CHME CHDEP   CHT..CHNAME\n";

pub fn generate(table: &SectionTable<Vec<Chemical>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let c5 = Col::text(5);

    let mut out = String::from("*CHEMICAL APPLICATIONS\n");
    out.push_str(HEADER);
    for (i, events) in table.iter() {
        for c in events {
            out.push_str(&index2(i));
            out.push_str(&date(DateFormat::Legacy, &c.date));
            out.push_str(&c5.field(&c.chcd, MISSING));
            out.push_str(&Col::real(5).field(&c.chamt, MISSING));
            out.push_str(&c5.field(&c.chacd, MISSING));
            out.push_str(&c5.field(&c.chdep, MISSING));
            out.push_str(&c5.field(&c.ch_targets, MISSING));
            out.push_str(&trailing_name("  ", &c.ch_name));
        }
    }
    out.push('\n');
    out
}
