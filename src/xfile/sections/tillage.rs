//! Tillage and rotations section

use super::{date, trailing_name};
use crate::model::Tillage;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index2, Col, MISSING};
use crate::xref::SectionTable;

pub fn generate(table: &SectionTable<Vec<Tillage>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let c5 = Col::text(5);

    let mut out = String::from("*TILLAGE AND ROTATIONS\n@T TDATE TIMPL  TDEP TNAME\n");
    for (i, events) in table.iter() {
        for t in events {
            out.push_str(&index2(i));
            out.push_str(&date(DateFormat::Legacy, &t.date));
            out.push_str(&c5.field(&t.tiimp, MISSING));
            out.push_str(&c5.field(&t.tidep, MISSING));
            out.push_str(&trailing_name(" ", &t.ti_name));
        }
    }
    out.push('\n');
    out
}
