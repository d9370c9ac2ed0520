//! Simulation controls and automatic management section
//!
//! Every control set becomes one block of ten sub-blocks. A sub-block
//! with no fields in the control set gets its fixed default line; the
//! defaults of the automatic management sub-blocks use the `YYDDD` layout
//! regardless of the date format.

use super::trailing_name;
use crate::model::control::{present, AutoHarvest, AutoPlanting, General};
use crate::model::{text_or, Scalar, SimControl};
use crate::utils::dates::DateFormat;
use crate::utils::format::{integer_part, Col, MISSING};
use crate::xref::SectionTable;

const GENERAL_HEADER_Y2K: &str =
    "@N      GENERAL     NYERS NREPS START    SDATE RSEED SNAME.................... SMODEL\n";
const GENERAL_HEADER_LEGACY: &str =
    "@N      GENERAL     NYERS NREPS START SDATE RSEED SNAME.................... SMODEL\n";
const OPTIONS_HEADER: &str =
    "@N      OPTIONS     WATER NITRO SYMBI PHOSP POTAS DISES  CHEM  TILL   CO2\n";
const METHODS_HEADER: &str =
    "@N      METHODS     WTHER INCON LIGHT EVAPO INFIL PHOTO HYDRO NSWIT MESOM MESEV MESOL\n";
const MANAGEMENT_HEADER: &str = "@N      MANAGEMENT  PLANT IRRIG FERTI RESID HARVS\n";
const OUTPUTS_HEADER: &str = "@N      OUTPUTS     FNAME OVVEW SUMRY FROPT GROUT CAOUT WAOUT NIOUT MIOUT DIOUT VBOSE CHOUT OPOUT\n";
const AUTOMATIC_HEADER: &str = "@  AUTOMATIC MANAGEMENT\n";
const PLANTING_HEADER_Y2K: &str =
    "@N      PLANTING       PFRST    PLAST PH2OL PH2OU PH2OD PSTMX PSTMN\n";
const PLANTING_HEADER_LEGACY: &str =
    "@N      PLANTING    PFRST PLAST PH2OL PH2OU PH2OD PSTMX PSTMN\n";
const IRRIGATION_HEADER: &str = "@N      IRRIGATION  IMDEP ITHRL ITHRU IROFF IMETH IRAMT IREFF\n";
const NITROGEN_HEADER: &str = "@N      NITROGEN    NMDEP NMTHR NAMNT NCODE NAOFF\n";
const RESIDUES_HEADER: &str = "@N      RESIDUES    RIPCN RTIME RIDEP\n";
const HARVEST_HEADER_Y2K: &str = "@N      HARVEST        HFRST    HLAST HPCNP HPCNR\n";
const HARVEST_HEADER_LEGACY: &str = "@N      HARVEST     HFRST HLAST HPCNP HPCNR\n";

const FLAG: Col = Col::text(1).lead(5);
const C5: Col = Col::text(5);
const DAY: Col = Col::text(3).lead(0).zero_pad();

pub fn generate(table: &SectionTable<SimControl>, dates: DateFormat) -> String {
    let mut out = String::from("*SIMULATION CONTROLS\n");
    if table.is_empty() {
        out.push_str(&block(1, &SimControl::default(), dates));
        return out;
    }
    let blocks: Vec<String> = table.iter().map(|(i, c)| block(i, c, dates)).collect();
    out.push_str(&blocks.join("\n\n"));
    out
}

/// Opening columns of a sub-block row: control number and sub-block code.
fn label(sm: &str, code: &str) -> String {
    Col::text(7).lead(0).left().fmt(sm) + &Col::text(11).left().fmt(code)
}

/// Year column of the automatic management and start dates.
fn year_col(dates: DateFormat) -> Col {
    match dates {
        DateFormat::Extended => Col::text(5),
        DateFormat::Legacy => Col::text(2).zero_pad(),
    }
}

/// Split an encoded date into its year and day-of-year parts.
fn split_date(encoded: &str) -> Option<(&str, &str)> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() || trimmed == MISSING || trimmed.len() < 4 || !trimmed.is_ascii() {
        return None;
    }
    Some(trimmed.split_at(trimmed.len() - 3))
}

fn year_day(dates: DateFormat, year: &Option<Scalar>, day: &Option<Scalar>) -> String {
    year_col(dates).fmt(integer_part(text_or(year, MISSING)))
        + &DAY.fmt(integer_part(text_or(day, MISSING)))
}

/// One control block, numbered `smid`.
pub fn block(smid: usize, c: &SimControl, dates: DateFormat) -> String {
    let sm = format!("{:2}", smid);

    let co2 = match c.co2y.as_ref().map(|s| s.as_str().trim()) {
        Some(y) if !y.is_empty() && !y.starts_with('-') => "W",
        _ => "M",
    };
    let har_opt = match c.hadat_valid.as_ref().map(|s| s.as_str().trim()) {
        Some(v) if !v.is_empty() => "R",
        _ => "M",
    };
    let start = match c.sdat.as_ref().filter(|s| !s.is_empty()) {
        Some(s) => s.as_str(),
        None => c
            .planting
            .as_ref()
            .map_or(MISSING, |p| text_or(&p.date, MISSING)),
    };
    let start = dates.encode(start);

    let mut sb = String::new();
    sb.push_str(match dates {
        DateFormat::Extended => GENERAL_HEADER_Y2K,
        DateFormat::Legacy => GENERAL_HEADER_LEGACY,
    });
    match present(&c.general) {
        Some(g) => sb.push_str(&general(&sm, g, &start, dates)),
        None => {
            let sdate = match dates {
                DateFormat::Extended => format!("{:<7}", start),
                DateFormat::Legacy => format!("{:<5}", start),
            };
            sb.push_str(&format!(
                "{} GE              1     1     S {}  2150 DEFAULT SIMULATION CONTROL\n",
                sm, sdate
            ));
        }
    }

    sb.push_str(OPTIONS_HEADER);
    match present(&c.options) {
        Some(o) => {
            sb.push_str(&label(&sm, "OP"));
            for value in [
                &o.water, &o.nitro, &o.symbi, &o.phosp, &o.potas, &o.dises, &o.chem, &o.till,
                &o.co2,
            ] {
                sb.push_str(&FLAG.field(value, MISSING));
            }
            sb.push('\n');
        }
        None => sb.push_str(&format!(
            "{} OP              Y     Y     Y     N     N     N     N     Y     {}\n",
            sm, co2
        )),
    }

    sb.push_str(METHODS_HEADER);
    match present(&c.methods) {
        Some(m) => {
            sb.push_str(&label(&sm, "ME"));
            for value in [
                &m.wther, &m.incon, &m.light, &m.evapo, &m.infil, &m.photo, &m.hydro, &m.nswit,
                &m.mesom, &m.mesev, &m.mesol,
            ] {
                sb.push_str(&FLAG.field(value, MISSING));
            }
            sb.push('\n');
        }
        None => sb.push_str(&format!(
            "{} ME              M     M     E     R     S     L     R     1     P     S     2\n",
            sm
        )),
    }

    sb.push_str(MANAGEMENT_HEADER);
    match present(&c.management) {
        Some(m) => {
            sb.push_str(&label(&sm, "MA"));
            for value in [&m.plant, &m.irrig, &m.ferti, &m.resid, &m.harvs] {
                sb.push_str(&FLAG.field(value, MISSING));
            }
            sb.push('\n');
        }
        None => sb.push_str(&format!(
            "{} MA              R     R     R     R     {}\n",
            sm, har_opt
        )),
    }

    sb.push_str(OUTPUTS_HEADER);
    match present(&c.outputs) {
        Some(o) => {
            sb.push_str(&label(&sm, "OU"));
            sb.push_str(&FLAG.field(&o.fname, MISSING));
            sb.push_str(&FLAG.field(&o.ovvew, MISSING));
            sb.push_str(&FLAG.field(&o.sumry, MISSING));
            sb.push_str(&Col::text(2).lead(4).field(&o.fropt, MISSING));
            for value in [
                &o.grout, &o.caout, &o.waout, &o.niout, &o.miout, &o.diout, &o.vbose, &o.chout,
                &o.opout,
            ] {
                sb.push_str(&FLAG.field(value, MISSING));
            }
            sb.push_str("\n\n");
        }
        None => sb.push_str(&format!(
            "{} OU              N     Y     Y     1     Y     Y     N     N     N     N     N     N     N\n\n",
            sm
        )),
    }

    sb.push_str(AUTOMATIC_HEADER);
    match present(&c.planting) {
        Some(p) => sb.push_str(&auto_planting(&sm, p, dates)),
        None => {
            sb.push_str(PLANTING_HEADER_LEGACY);
            sb.push_str(&format!(
                "{} PL          82050 82064    40   100    30    40    10\n",
                sm
            ));
        }
    }

    sb.push_str(IRRIGATION_HEADER);
    match present(&c.irrigation) {
        Some(ir) => {
            sb.push_str(&label(&sm, "IR"));
            for value in [&ir.imdep, &ir.ithrl, &ir.ithru, &ir.iroff, &ir.imeth, &ir.iramt] {
                sb.push_str(&C5.field(value, MISSING));
            }
            sb.push_str(&Col::real(5).dec(2).field(&ir.ireff, MISSING));
            sb.push('\n');
        }
        None => sb.push_str(&format!(
            "{} IR             30    50   100 GS000 IR001    10  1.00\n",
            sm
        )),
    }

    sb.push_str(NITROGEN_HEADER);
    match present(&c.nitrogen) {
        Some(n) => {
            sb.push_str(&label(&sm, "NI"));
            for value in [&n.nmdep, &n.nmthr, &n.namnt, &n.ncode, &n.naoff] {
                sb.push_str(&C5.field(value, MISSING));
            }
            sb.push('\n');
        }
        None => sb.push_str(&format!("{} NI             30    50    25 FE001 GS000\n", sm)),
    }

    sb.push_str(RESIDUES_HEADER);
    match present(&c.residues) {
        Some(r) => {
            sb.push_str(&label(&sm, "RE"));
            for value in [&r.ripcn, &r.rtime, &r.ridep] {
                sb.push_str(&C5.field(value, MISSING));
            }
            sb.push('\n');
        }
        None => sb.push_str(&format!("{} RE            100     1    20\n", sm)),
    }

    match present(&c.harvests) {
        Some(h) => sb.push_str(&auto_harvest(&sm, h, dates)),
        None => {
            sb.push_str(HARVEST_HEADER_LEGACY);
            sb.push_str(&format!("{} HA              0 83057   100     0", sm));
        }
    }
    sb
}

fn general(sm: &str, g: &General, start: &str, dates: DateFormat) -> String {
    let (sdyer, sdday) = match split_date(start) {
        Some((year, day)) => (year.to_string(), day.to_string()),
        None => (
            integer_part(text_or(&g.sdyer, MISSING)).to_string(),
            integer_part(text_or(&g.sdday, MISSING)).to_string(),
        ),
    };
    let mut line = label(sm, "GE");
    line.push_str(&Col::text(3).lead(3).field(&g.nyers, MISSING));
    line.push_str(&Col::text(2).lead(4).field(&g.nreps, MISSING));
    line.push_str(&FLAG.field(&g.start, MISSING));
    line.push_str(&year_col(dates).fmt(&sdyer));
    line.push_str(&DAY.fmt(&sdday));
    line.push_str(&C5.field(&g.rseed, MISSING));
    line.push_str(&Col::text(25).left().field(&g.sname, MISSING));
    line.push_str(&trailing_name(" ", &g.smodel));
    line
}

fn auto_planting(sm: &str, p: &AutoPlanting, dates: DateFormat) -> String {
    let mut out = String::from(match dates {
        DateFormat::Extended => PLANTING_HEADER_Y2K,
        DateFormat::Legacy => PLANTING_HEADER_LEGACY,
    });
    out.push_str(&label(sm, "PL"));
    out.push_str(&year_day(dates, &p.pfyer, &p.pfday));
    out.push_str(&year_day(dates, &p.plyer, &p.plday));
    for value in [&p.ph2ol, &p.ph2ou, &p.ph2od, &p.pstmx, &p.pstmn] {
        out.push_str(&C5.field(value, MISSING));
    }
    out.push('\n');
    out
}

fn auto_harvest(sm: &str, h: &AutoHarvest, dates: DateFormat) -> String {
    let (header, hfrst) = match dates {
        DateFormat::Extended => (HARVEST_HEADER_Y2K, Col::text(8)),
        DateFormat::Legacy => (HARVEST_HEADER_LEGACY, C5),
    };
    let mut out = String::from(header);
    out.push_str(&label(sm, "HA"));
    out.push_str(&hfrst.field(&h.hfrst, MISSING));
    out.push_str(&year_day(dates, &h.hlyer, &h.hlday));
    out.push_str(&C5.field(&h.hpcnp, MISSING));
    out.push_str(&C5.field(&h.hpcnr, MISSING));
    out
}
