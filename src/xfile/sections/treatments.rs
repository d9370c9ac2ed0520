//! Treatment table
//!
//! One row per sequence: treatment number, rotation flags, name and the
//! 1-based level of every section (0 = absent).

use crate::assembler::Treatment;
use crate::utils::format::Col;

const HEADER: &str = "*TREATMENTS                        -------------FACTOR LEVELS------------\n\
@N      R O C TNAME.................... CU      FL      SA      IC      MP      MI      MF      MR      MC      MT      ME      MH      SM\n";

const LEVEL: Col = Col::real(7).left();

pub fn generate(treatments: &[Treatment]) -> String {
    let mut out = HEADER.to_string();
    for t in treatments {
        let s = &t.sequence;
        out.push_str(&Col::real(7).lead(0).left().field(&s.trno, "1"));
        out.push_str(&Col::real(1).field(&s.sq, "1"));
        out.push_str(&Col::real(1).field(&s.op, "1"));
        out.push_str(&Col::real(1).field(&s.co, "0"));
        out.push_str(&Col::text(25).left().field(&s.trt_name, ""));
        for level in t.levels.as_array() {
            out.push_str(&LEVEL.num(level as f64));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}
