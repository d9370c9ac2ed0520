//! Cultivar (CUL) and ecotype (ECO) file writers
//!
//! The crop code of the first set selects the coefficient columns. Sets
//! missing a coefficient simply skip that column.

use super::crops::{crop_name, cultivar_params, ecotype_params, ecotype_without_name};
use crate::error::{Result, TranslateError};
use crate::model::ParamSet;
use crate::utils::format::{Col, MISSING};

/// File-format version that uses the `$CULTIVARS:` / `$ECOTYPES:` headers.
pub const VERSION_46: &str = "4.6";

const COEFFICIENT: Col = Col::text(5);

fn crop_code(sets: &[ParamSet]) -> Result<&str> {
    sets.first()
        .and_then(|s| s.get("crid"))
        .map(|c| c.as_str())
        .ok_or_else(|| TranslateError::UnsupportedCrop(String::new()))
}

fn header_columns(params: &[&str]) -> String {
    params.iter().map(|p| format!("{:>6}", p.to_uppercase())).collect()
}

fn coefficients(set: &ParamSet, params: &[&str]) -> String {
    let mut row: String = params
        .iter()
        .filter_map(|p| set.get(p))
        .map(|v| COEFFICIENT.fmt(v.as_str()))
        .collect();
    row.push('\n');
    row
}

/// Cultivar file for the generated cultivars; empty when there are none.
pub fn generate_cul(sets: &[ParamSet], cul_file: &str, version: &str) -> Result<String> {
    if sets.is_empty() {
        return Ok(String::new());
    }
    let crid = crop_code(sets)?;
    let params = cultivar_params(crid)?;
    let model = cul_file.replace(".CUL", "");

    let mut out = if version == VERSION_46 {
        format!("$CULTIVARS:{}.010115   Last edit:241214\n\n", model)
    } else {
        format!("*{} CULTIVAR COEFFICIENTS: {} MODEL\n\n", crop_name(crid)?, model)
    };
    out.push_str("@VAR#  VRNAME.......... EXPNO   ECO#");
    out.push_str(&header_columns(params));
    out.push('\n');

    for (i, set) in sets.iter().enumerate() {
        let eco = set.get("eco").map(|e| e.as_str()).unwrap_or(MISSING);
        out.push_str(&format!("CC{:04} Generic{:04}          . {}", i, i, eco));
        out.push_str(&coefficients(set, params));
    }
    Ok(out)
}

/// Ecotype file for the generated ecotypes; empty when there are none.
pub fn generate_eco(sets: &[ParamSet], eco_file: &str, version: &str) -> Result<String> {
    if sets.is_empty() {
        return Ok(String::new());
    }
    let crid = crop_code(sets)?;
    let params = ecotype_params(crid)?;
    let model = eco_file.replace(".ECO", "");
    let unnamed = ecotype_without_name(crid);

    let mut out = if version == VERSION_46 {
        format!("$ECOTYPES:{}.010115   Last edit:241214\n\n", model)
    } else {
        format!("$ECOTYPES: {}\n\n*ECOTYPE: {}\n", model, model)
    };
    if unnamed {
        out.push_str(&format!("@ECO# {}\n", header_columns(params)));
    } else {
        out.push_str(&format!("@ECO#  ECONAME......... {}\n", header_columns(params)));
    }

    for (i, set) in sets.iter().enumerate() {
        if unnamed {
            out.push_str(&format!("{:06}", i + 1));
        } else {
            out.push_str(&format!("{:06} Generic{:04}      ", i + 1, i + 1));
        }
        out.push_str(&coefficients(set, params));
    }
    Ok(out)
}
