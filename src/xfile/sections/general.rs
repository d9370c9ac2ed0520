//! Experiment details and general section

use crate::model::{text_or, ExperimentMeta};
use crate::utils::format::{Col, MISSING};

const PLOT_HEADER: &str =
    "@ PAREA  PRNO  PLEN  PLDR  PLSP  PLAY HAREA  HRNO  HLEN  HARM.........\n";

/// `*EXP.DETAILS` line and the `*GENERAL` section. People, address, site,
/// plot and notes blocks appear only when present.
pub fn generate(meta: &ExperimentMeta) -> String {
    let mut out = format!(
        "*EXP.DETAILS: {:<10} {:<60}\n\n",
        text_or(&meta.exname_o, ""),
        text_or(&meta.local_name, "")
    );
    out.push_str("*GENERAL\n");

    let people = text_or(&meta.person_notes, "");
    if !people.is_empty() {
        out.push_str(&format!("@PEOPLE\n {:<75}\n", people));
    }
    let address = text_or(&meta.institution, "");
    if !address.is_empty() {
        out.push_str(&format!("@ADDRESS\n {:<75}\n", address));
    }
    let site = text_or(&meta.site_name, "");
    if !site.is_empty() {
        out.push_str(&format!("@SITE\n {:<75}\n\n", site));
    }

    if meta.has_plot() {
        out.push_str(PLOT_HEADER);
        let r5 = Col::real(5);
        out.push_str(&Col::real(6).lead(3).dec(1).field(&meta.plta, MISSING));
        out.push_str(&r5.field(&meta.pltr_no, MISSING));
        out.push_str(&r5.dec(1).field(&meta.pltln, MISSING));
        out.push_str(&r5.field(&meta.pldr, MISSING));
        out.push_str(&r5.field(&meta.pltsp, MISSING));
        out.push_str(&Col::text(5).field(&meta.pllay, MISSING));
        out.push_str(&r5.dec(1).field(&meta.pltha, MISSING));
        out.push_str(&r5.field(&meta.plth_no, MISSING));
        out.push_str(&r5.dec(1).field(&meta.plthl, MISSING));
        out.push_str(&Col::text(15).field(&meta.plthm, MISSING));
        out.push('\n');
    }

    let notes = text_or(&meta.tr_notes, "");
    if !notes.is_empty() {
        out.push_str(&format!("@NOTES\n {:<75}\n\n", notes));
    }
    out
}
