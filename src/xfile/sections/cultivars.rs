//! Cultivars section

use tracing::warn;

use crate::model::{text_or, CultivarRef};
use crate::utils::format::{index7, Col, MISSING};
use crate::xref::SectionTable;

pub fn generate(table: &SectionTable<CultivarRef>) -> String {
    if table.is_empty() {
        warn!("cultivar information is missing");
        return String::new();
    }
    let mut out = String::from("*CULTIVARS\n@C      CR INGENO CNAME\n");
    for (i, cu) in table.iter() {
        if text_or(&cu.crid, "").is_empty() {
            warn!(level = i, "cultivar CRID is missing");
        }
        out.push_str(&index7(i));
        out.push_str(&Col::text(2).field(&cu.crid, ""));
        out.push_str(&Col::text(6).field(&cu.cul_id, MISSING));
        out.push_str(&Col::text(16).left().field(&cu.cul_name, MISSING));
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    #[test]
    fn test_cultivar_rows() {
        let mut table = SectionTable::new("cultivars");
        table.intern(CultivarRef {
            crid: Some(Scalar::from("MZ")),
            cul_id: Some(Scalar::from("IB0001")),
            cul_name: Some(Scalar::from("PIO 3382")),
            ..Default::default()
        });
        let text = generate(&table);
        assert_eq!(
            text,
            "*CULTIVARS\n@C      CR INGENO CNAME\n1       MZ IB0001 PIO 3382        \n\n"
        );
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        assert_eq!(generate(&SectionTable::new("cultivars")), "");
    }
}
