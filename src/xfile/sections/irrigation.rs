//! Irrigation and water management section
//!
//! Each irrigation record gets a management line taken from its first event
//! followed by one row per application.

use super::{date, trailing_name};
use crate::model::Irrigation;
use crate::utils::dates::DateFormat;
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

const MANAGEMENT_HEADER: &str = "@I      EFIR  IDEP  ITHR  IEPT  IOFF  IAME  IAMT IRNAME\n";
const EVENT_HEADER_Y2K: &str = "@I         IDATE  IROP IRVAL\n";
const EVENT_HEADER_LEGACY: &str = "@I      IDATE  IROP IRVAL\n";

pub fn generate(table: &SectionTable<Vec<Irrigation>>, dates: DateFormat) -> String {
    if table.is_empty() {
        return String::new();
    }
    let r5 = Col::real(5);
    let c5 = Col::text(5);

    let mut out = String::from("*IRRIGATION AND WATER MANAGEMENT\n");
    for (i, events) in table.iter() {
        let Some(first) = events.first() else {
            continue;
        };
        out.push_str(MANAGEMENT_HEADER);
        out.push_str(&index7(i));
        out.push_str(&r5.lead(0).dec(2).field(&first.ireff, MISSING));
        out.push_str(&r5.field(&first.irmdp, MISSING));
        out.push_str(&r5.field(&first.irthr, MISSING));
        out.push_str(&r5.field(&first.irept, MISSING));
        out.push_str(&c5.field(&first.irstg, MISSING));
        out.push_str(&c5.field(&first.iame, MISSING));
        out.push_str(&r5.field(&first.iamt, MISSING));
        out.push_str(&trailing_name(" ", &first.ir_name));

        out.push_str(match dates {
            DateFormat::Extended => EVENT_HEADER_Y2K,
            DateFormat::Legacy => EVENT_HEADER_LEGACY,
        });
        for event in events {
            out.push_str(&index7(i));
            out.push_str(&date(dates, &event.date));
            out.push_str(&c5.field(&event.irop, MISSING));
            out.push_str(&r5.field(&event.irval, MISSING));
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    fn irrigation(date: &str, irval: &str) -> Irrigation {
        Irrigation {
            date: Some(Scalar::from(date)),
            ireff: Some(Scalar::from("0.9")),
            irop: Some(Scalar::from("IR001")),
            irval: Some(Scalar::from(irval)),
            ..Default::default()
        }
    }

    #[test]
    fn test_management_and_event_rows() {
        let mut table = SectionTable::new("irrigation");
        table.intern(vec![
            irrigation("19950601", "25"),
            irrigation("19950615", "30"),
        ]);
        let text = generate(&table, DateFormat::Extended);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "*IRRIGATION AND WATER MANAGEMENT");
        assert_eq!(
            lines[2],
            "1       0.90   -99   -99   -99   -99   -99   -99 -99"
        );
        assert_eq!(lines[3], EVENT_HEADER_Y2K.trim_end());
        assert_eq!(lines[4], "1        1995152 IR001    25");
        assert_eq!(lines[5], "1        1995166 IR001    30");
        assert!(text.ends_with("30\n\n"));
    }

    #[test]
    fn test_legacy_event_dates() {
        let mut table = SectionTable::new("irrigation");
        table.intern(vec![irrigation("19950601", "25")]);
        let text = generate(&table, DateFormat::Legacy);
        assert!(text.contains("\n1       95152 IR001    25\n"));
    }
}
