//! Inorganic fertilizer section

use super::{date, trailing_name};
use crate::model::Fertilizer;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str =
    "@F      FDATE  FMCD  FACD  FDEP  FAMN  FAMP  FAMK  FAMC  FAMO  FOCD FERNAME\n";

/// Fertilizer dates are always written as `YYDDD`.
pub fn generate(table: &SectionTable<Vec<Fertilizer>>) -> String {
    if table.is_empty() {
        return String::new();
    }
    let r5 = Col::real(5);
    let c5 = Col::text(5);

    let mut out = String::from("*FERTILIZERS (INORGANIC)\n");
    out.push_str(HEADER);
    for (i, events) in table.iter() {
        for f in events {
            out.push_str(&index7(i));
            out.push_str(&date(DateFormat::Legacy, &f.date));
            out.push_str(&c5.field(&f.fecd, MISSING));
            out.push_str(&c5.field(&f.feacd, MISSING));
            for value in [&f.fedep, &f.feamn, &f.feamp, &f.feamk, &f.feamc, &f.feamo] {
                out.push_str(&r5.field(value, MISSING));
            }
            out.push_str(&c5.field(&f.feocd, MISSING));
            out.push_str(&trailing_name(" ", &f.fe_name));
        }
    }
    out.push('\n');
    out
}
