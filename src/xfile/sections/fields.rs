//! Fields section
//!
//! Two blocks: identity and soil columns first, then coordinates and
//! geometry for the same levels.

use tracing::warn;

use super::trailing_name;
use crate::assembler::FieldRecord;
use crate::model::text_or;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const HEADER: &str = "*FIELDS\n\
@L      ID_FIELD WSTA....  FLSA  FLOB  FLDT  FLDD  FLDS  FLST SLTX  SLDP  ID_SOIL    FLNAME\n";
const HEADER_PART2: &str =
    "@L      ...........XCRD ...........YCRD .....ELEV .............AREA .SLEN .FLWR .SLAS FLHST FHDUR\n";

pub fn generate(table: &SectionTable<FieldRecord>) -> String {
    if table.is_empty() {
        warn!("field information is missing");
        return String::new();
    }
    let r5 = Col::real(5);
    let t5 = Col::text(5);

    let mut out = HEADER.to_string();
    let mut part2 = HEADER_PART2.to_string();
    for (i, field) in table.iter() {
        let a = &field.attrs;
        if text_or(&a.wst_id, "").is_empty() {
            warn!(level = i, "field WST_ID is missing");
        }
        let soil_id = &field.soil_id_composite;
        if soil_id.is_empty() {
            warn!(level = i, "field SOIL_ID is missing");
        } else if soil_id.len() > 10 {
            warn!(level = i, soil_id = %soil_id, "oversized field SOIL_ID");
        }

        out.push_str(&index7(i));
        out.push_str(&Col::text(8).left().field(&a.id_field, MISSING));
        out.push_str(&Col::text(8).left().field(&a.wst_id, MISSING));
        out.push_str(&t5.field(&a.flsl, MISSING));
        out.push_str(&r5.field(&a.flob, MISSING));
        out.push_str(&t5.left().field(&a.fl_drntype, MISSING));
        out.push_str(&r5.field(&a.fldrd, MISSING));
        out.push_str(&r5.field(&a.fldrs, MISSING));
        out.push_str(&t5.left().field(&a.flst, MISSING));
        out.push_str(&t5.left().field(&a.sltx, MISSING));
        out.push_str(&r5.field(&field.sldp, MISSING));
        out.push_str(&Col::text(10).left().fmt(soil_id));
        out.push_str(&trailing_name(" ", &a.fl_name));

        part2.push_str(&index7(i));
        part2.push_str(&Col::real(15).dec(2).field(&a.fl_long, MISSING));
        part2.push_str(&Col::real(15).dec(2).field(&a.fl_lat, MISSING));
        part2.push_str(&Col::real(9).field(&a.flele, MISSING));
        part2.push_str(&Col::real(17).field(&a.farea, MISSING));
        part2.push_str(" -99  ");
        part2.push_str(&r5.field(&a.fllwr, MISSING));
        part2.push_str(&r5.field(&a.flsla, MISSING));
        part2.push_str(&t5.field(&field.flhst, MISSING));
        part2.push_str(&r5.field(&field.fhdur, MISSING));
        part2.push('\n');
    }
    out.push_str(&part2);
    out.push('\n');
    out
}
