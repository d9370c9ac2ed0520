//! Coefficient modifiers
//!
//! A modifier set is matched to a parameter set by `seqid`. For each
//! coefficient only the first present modifier applies, in the order
//! `offset_`, `scale_`, `max_`, `min_`, `set_`. `cul_id` and `eco` are then
//! rounded to an integer and cut to six characters.

use tracing::warn;

use crate::error::ModifierError;
use crate::model::{ParamSet, Scalar};

/// Modifier prefixes in precedence order.
pub const MODIFIER_PREFIXES: [&str; 5] = ["offset_", "scale_", "max_", "min_", "set_"];

const INTEGER_KEYS: [&str; 2] = ["cul_id", "eco"];

fn numeric(text: &Scalar) -> Option<f64> {
    text.as_f64()
}

/// Modified value of one coefficient. On failure the caller keeps the
/// original value.
pub fn modify(key: &str, value: &Scalar, mods: &ParamSet) -> Result<Scalar, ModifierError> {
    let modifier = MODIFIER_PREFIXES.iter().find_map(|prefix| {
        let name = format!("{}{}", prefix, key);
        mods.get(&name).map(|m| (*prefix, name, m))
    });
    let was_modified = modifier.is_some();

    let modified = match modifier {
        None => value.clone(),
        Some(("set_", _, m)) => m.clone(),
        Some((prefix, name, m)) => {
            let v = numeric(value).ok_or_else(|| ModifierError::NonNumericValue {
                key: key.to_string(),
                value: value.to_string(),
            })?;
            let by = numeric(m).ok_or_else(|| ModifierError::NonNumericModifier {
                modifier: name.clone(),
                value: m.to_string(),
            })?;
            let result = match prefix {
                "offset_" => v + by,
                "scale_" => v * by,
                "max_" => v.min(by),
                _ => v.max(by),
            };
            Scalar::number(result)
        }
    };

    if INTEGER_KEYS.contains(&key) {
        return match numeric(&modified) {
            Some(v) => {
                let rounded = format!("{}", v.round() as i64);
                Ok(Scalar::new(rounded.chars().take(6).collect::<String>()))
            }
            // identifiers that were never modified stay as they are
            None if !was_modified => Ok(modified),
            None => Err(ModifierError::NonNumericValue {
                key: key.to_string(),
                value: modified.to_string(),
            }),
        };
    }

    Ok(modified)
}

/// Apply modifier sets to parameter sets with a matching `seqid`.
///
/// Sets without a matching modifier set are returned unchanged. Failed
/// coefficients keep their value and their errors are returned.
pub fn apply_mods(sets: &[ParamSet], mods: &[ParamSet]) -> (Vec<ParamSet>, Vec<ModifierError>) {
    let mut out = sets.to_vec();
    let mut errors = Vec::new();
    if mods.is_empty() {
        return (out, errors);
    }

    let mut seen: Vec<&str> = Vec::new();
    for (i, set) in sets.iter().enumerate() {
        let seqid = set.seqid();
        // first set per sequence only
        if seen.contains(&seqid) {
            continue;
        }
        seen.push(seqid);

        let Some(set_mods) = mods.iter().find(|m| m.seqid() == seqid) else {
            continue;
        };

        let keys: Vec<String> = set.keys().cloned().collect();
        for key in keys {
            let Some(value) = set.get(&key) else {
                continue;
            };
            match modify(&key, value, set_mods) {
                Ok(modified) => out[i].insert(key, modified),
                Err(e) => {
                    warn!(seqid, error = %e, "coefficient modifier not applied");
                    errors.push(e);
                }
            }
        }
    }

    (out, errors)
}
