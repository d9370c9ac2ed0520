//! Planting details section

use tracing::warn;

use super::{date, trailing_name};
use crate::model::{text_or, Planting, Scalar};
use crate::utils::dates::DateFormat;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const HEADER_Y2K: &str = "@P         PDATE    EDATE  PPOP  PPOE  PLME  PLDS  PLRS  PLRD  PLDP  PLWT  PAGE  PENV  PLPH  SPRL                        PLNAME\n";
const HEADER_LEGACY: &str = "@P      PDATE EDATE  PPOP  PPOE  PLME  PLDS  PLRS  PLRD  PLDP  PLWT  PAGE  PENV  PLPH  SPRL                        PLNAME\n";

/// Planting depth is given in mm and written in cm.
fn depth_cm(pldp: &Option<Scalar>) -> Option<Scalar> {
    let value = pldp.as_ref()?;
    if value.is_empty() {
        return Some(value.clone());
    }
    match value.as_f64() {
        Some(mm) => Some(Scalar::number(mm / 10.0)),
        None => {
            warn!(pldp = %value, "planting depth is not numeric");
            Some(value.clone())
        }
    }
}

pub fn generate(table: &SectionTable<Planting>, dates: DateFormat) -> String {
    if table.is_empty() {
        warn!("planting information is missing");
        return String::new();
    }
    let r5 = Col::real(5);
    let flag = Col::text(1).lead(5).left();

    let mut out = String::from("*PLANTING DETAILS\n");
    out.push_str(match dates {
        DateFormat::Extended => HEADER_Y2K,
        DateFormat::Legacy => HEADER_LEGACY,
    });
    for (i, p) in table.iter() {
        if text_or(&p.date, "").is_empty() {
            warn!(level = i, "planting PDATE is missing");
        }
        if text_or(&p.plpoe, "").is_empty() {
            warn!(level = i, "planting PLPOE is missing");
        }
        if text_or(&p.plrs, "").is_empty() {
            warn!(level = i, "planting PLRS is missing");
        }

        let plpop = text_or(&p.plpop, MISSING);
        let mut plpoe = text_or(&p.plpoe, MISSING);
        // emergence population follows planting population
        if plpoe.trim().parse::<f64>().ok() != plpop.trim().parse::<f64>().ok() {
            plpoe = plpop;
        }

        out.push_str(&index7(i));
        out.push_str(&date(dates, &p.date));
        out.push_str(&date(dates, &p.pldae));
        out.push_str(&r5.dec(1).fmt(plpop));
        out.push_str(&r5.dec(1).fmt(plpoe));
        out.push_str(&flag.field(&p.plma, MISSING));
        out.push_str(&flag.field(&p.plds, MISSING));
        out.push_str(&r5.field(&p.plrs, MISSING));
        out.push_str(&r5.field(&p.plrd, MISSING));
        out.push_str(&r5.dec(1).field(&depth_cm(&p.pldp), MISSING));
        out.push_str(&r5.field(&p.plmwt, MISSING));
        out.push_str(&r5.field(&p.page, MISSING));
        out.push_str(&r5.dec(1).field(&p.plenv, MISSING));
        out.push_str(&r5.dec(1).field(&p.plph, MISSING));
        out.push_str(&r5.field(&p.plspl, MISSING));
        out.push_str(&trailing_name(&" ".repeat(24), &p.pl_name));
    }
    out.push('\n');
    out
}
