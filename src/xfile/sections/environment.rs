//! Environment modifications section

use super::trailing_name;
use crate::model::{text_or, EnvModification};
use crate::utils::format::{index2, integer_part, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "@E ODATE EDAY  ERAD  EMAX  EMIN  ERAIN ECO2  EDEW  EWIND ENVNAME\n";

pub fn generate(table: &SectionTable<Vec<EnvModification>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let c5 = Col::text(5);
    let year = Col::text(2).zero_pad();
    let day = Col::text(3).lead(0).zero_pad();

    let mut out = String::from("*ENVIRONMENT MODIFICATIONS\n");
    out.push_str(HEADER);
    for (i, mods) in table.iter() {
        for e in mods {
            out.push_str(&index2(i));
            out.push_str(&year.fmt(integer_part(text_or(&e.odyer, MISSING))));
            out.push_str(&day.fmt(integer_part(text_or(&e.odday, MISSING))));
            for value in [
                &e.eday, &e.erad, &e.emax, &e.emin, &e.erain, &e.eco2, &e.edew, &e.ewind,
            ] {
                out.push_str(&c5.field(value, MISSING));
            }
            out.push_str(&trailing_name(" ", &e.envnam));
        }
    }
    out.push('\n');
    out
}
