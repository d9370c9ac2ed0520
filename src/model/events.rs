//! Management events
//!
//! Events are tagged by their `event` key. Unknown kinds deserialize to
//! `EventKind::Other` and are skipped by the assembler.

use serde::Deserialize;

use super::Scalar;

record! {
    /// Planting event. Once cultivar fields are stripped it is also the
    /// record of the planting details table.
    pub struct Planting {
        date: "date",
        pldae: "pldae",
        plpop: "plpop",
        plpoe: "plpoe",
        plma: "plma",
        plds: "plds",
        plrs: "plrs",
        plrd: "plrd",
        pldp: "pldp",
        plmwt: "plmwt",
        page: "page",
        plenv: "plenv",
        plph: "plph",
        plspl: "plspl",
        pl_name: "pl_name",
        crid: "crid",
        cul_id: "cul_id",
        dssat_cul_id: "dssat_cul_id",
        cul_name: "cul_name",
        rm: "rm",
        cul_notes: "cul_notes",
    }
}

impl Planting {
    /// Planting details without the cultivar identity (`cul_name`,
    /// `cul_id`, `crid`).
    pub fn details(&self) -> Planting {
        Planting {
            crid: None,
            cul_id: None,
            cul_name: None,
            ..self.clone()
        }
    }
}

record! {
    /// Row of the cultivars table.
    pub struct CultivarRef {
        crid: "crid",
        cul_id: "cul_id",
        dssat_cul_id: "dssat_cul_id",
        cul_name: "cul_name",
        rm: "rm",
        cul_notes: "cul_notes",
    }
}

record! {
    pub struct Irrigation {
        date: "date",
        ireff: "ireff",
        irmdp: "irmdp",
        irthr: "irthr",
        irept: "irept",
        irstg: "irstg",
        iame: "iame",
        iamt: "iamt",
        ir_name: "ir_name",
        irop: "irop",
        irval: "irval",
    }
}

record! {
    pub struct Fertilizer {
        date: "date",
        fecd: "fecd",
        feacd: "feacd",
        fedep: "fedep",
        feamn: "feamn",
        feamp: "feamp",
        feamk: "feamk",
        feamc: "feamc",
        feamo: "feamo",
        feocd: "feocd",
        fe_name: "fe_name",
    }
}

record! {
    pub struct OrganicMatter {
        date: "date",
        omcd: "omcd",
        omamt: "omamt",
        omn_pct: "omn%",
        omp_pct: "omp%",
        omk_pct: "omk%",
        ominp: "ominp",
        omdep: "omdep",
        omacd: "omacd",
        om_name: "om_name",
    }
}

record! {
    pub struct Chemical {
        date: "date",
        chcd: "chcd",
        chamt: "chamt",
        chacd: "chacd",
        chdep: "chdep",
        ch_targets: "ch_targets",
        ch_name: "ch_name",
    }
}

record! {
    pub struct Tillage {
        date: "date",
        tiimp: "tiimp",
        tidep: "tidep",
        ti_name: "ti_name",
    }
}

record! {
    pub struct Harvest {
        date: "date",
        hastg: "hastg",
        hacom: "hacom",
        hasiz: "hasiz",
        hap_pct: "hap%",
        hab_pct: "hab%",
        ha_name: "ha_name",
    }
}

impl Harvest {
    /// True when the harvest carries a non-blank date.
    pub fn has_date(&self) -> bool {
        self.date.as_ref().is_some_and(|d| !d.is_blank())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Planting(Planting),
    Irrigation(Irrigation),
    Fertilizer(Fertilizer),
    OrganicMatter(OrganicMatter),
    Chemical(Chemical),
    Tillage(Tillage),
    Harvest(Harvest),
    #[serde(other)]
    Other,
}

/// Management event bound to a sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub seqid: Option<Scalar>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// True when this event belongs to sequence `seqid` (absent ids compare
    /// as empty text).
    pub fn belongs_to(&self, seqid: &str) -> bool {
        super::text_or(&self.seqid, "") == seqid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tags() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"event": "planting", "seqid": "1", "date": "19950615", "crid": "MZ", "plpop": 7},
                {"event": "organic_matter", "seqid": "1", "omn%": "1.2"},
                {"event": "harvest", "seqid": 1, "date": "19951001"},
                {"event": "mulch", "seqid": "1"}
            ]"#,
        )
        .unwrap();

        match &events[0].kind {
            EventKind::Planting(p) => {
                assert_eq!(p.crid.as_ref().unwrap().as_str(), "MZ");
                assert_eq!(p.plpop.as_ref().unwrap().as_str(), "7");
            }
            other => panic!("expected planting, got {:?}", other),
        }
        match &events[1].kind {
            EventKind::OrganicMatter(om) => {
                assert_eq!(om.omn_pct.as_ref().unwrap().as_str(), "1.2")
            }
            other => panic!("expected organic matter, got {:?}", other),
        }
        assert!(events[2].belongs_to("1"));
        assert!(matches!(events[3].kind, EventKind::Other));
    }

    #[test]
    fn test_planting_details_strip_cultivar() {
        let p = Planting {
            date: Some("19950615".into()),
            crid: Some("MZ".into()),
            cul_id: Some("IB0001".into()),
            cul_name: Some("Pioneer".into()),
            rm: Some("110".into()),
            ..Default::default()
        };
        let d = p.details();
        assert!(d.crid.is_none() && d.cul_id.is_none() && d.cul_name.is_none());
        assert_eq!(d.rm, p.rm);
        assert_eq!(d.date, p.date);
    }
}
