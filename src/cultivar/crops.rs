//! Crop tables
//!
//! Two-letter crop codes, their model names and the ordered coefficient
//! names written to the cultivar and ecotype files.

use crate::error::{Result, TranslateError};

const SOYBEAN_CUL: &[&str] = &[
    "csdl", "ppsen", "em-fl", "fl-sh", "fl-sd", "sd-pm", "fl-lf", "lfmax", "slavr", "sizlf",
    "xfrt", "wtpsd", "sfdur", "sdpdv", "podur", "thrsh", "sdpro", "sdlip",
];

const SMALL_GRAIN_CUL: &[&str] = &["p1v", "p1d", "p5", "g1", "g2", "g3", "phint"];

const SOYBEAN_ECO: &[&str] = &[
    "mg", "tm", "thvar", "pl-em", "em-v1", "v1-ju", "ju-r0", "pm06", "pm09", "lngsh", "r7-r8",
    "fl-vs", "trifl", "rwdth", "rhght", "r1ppo", "optbi", "slobi",
];

const COTTON_ECO: &[&str] = &[
    "mg", "tm", "thvar", "pl-em", "em-v1", "v1-ju", "ju-r0", "pm06", "pm09", "lngsh", "r7-r8",
    "fl-vs", "trifl", "rwdth", "rhght", "r1ppo", "optbi", "slobi", "kcan",
];

const SMALL_GRAIN_ECO: &[&str] = &[
    "p1", "p2fr1", "p2", "p3", "p4fr1", "p4fr2", "p4", "veff", "parue", "paru2", "phl2", "phf3",
    "la1s", "lafv", "lafr", "slas", "lsphs", "lsphe", "til#s", "tiphe", "tifac", "tdphs",
    "tdphe", "tdfac", "rdgs", "htstd", "awns", "kcan", "rs%s", "gn%s", "gn%mn", "tkfh",
];

/// Crops whose ecotype file has no ECONAME column.
pub fn ecotype_without_name(code: &str) -> bool {
    matches!(code, "BA" | "WH")
}

/// Model name of a crop code.
pub fn crop_name(code: &str) -> Result<&'static str> {
    let name = match code {
        "MZ" => "MAIZE",
        "SB" => "SOYBEAN",
        "WH" => "WHEAT",
        "RI" => "RICE",
        "SC" => "SUGARCANE",
        "SG" => "SORGHUM",
        "ML" => "MILLET",
        "CO" => "COTTON",
        "BA" => "BARLEY",
        "CN" => "CANOLA",
        other => return Err(TranslateError::UnsupportedCrop(other.to_string())),
    };
    Ok(name)
}

/// Ordered cultivar coefficient names of a crop.
pub fn cultivar_params(code: &str) -> Result<&'static [&'static str]> {
    let params: &'static [&'static str] = match code {
        "MZ" => &["p1", "p2", "p5", "g2", "g3", "phint"],
        "SB" | "CO" | "CN" => SOYBEAN_CUL,
        "WH" | "BA" => SMALL_GRAIN_CUL,
        "RI" => &["p1", "p2r", "p5", "p2o", "g1", "g2", "g3", "g4"],
        "SG" => &[
            "p1", "p2", "p2o", "p2r", "panth", "p3", "p4", "p5", "phint", "g1", "g2", "pbase",
            "psat",
        ],
        "ML" => &["p1", "p20", "p2r", "p5", "g1", "g4", "phint"],
        other => return Err(TranslateError::UnsupportedCrop(other.to_string())),
    };
    Ok(params)
}

/// Ordered ecotype coefficient names of a crop.
///
/// Rice and canola carry no ecotype coefficients; their table holds a
/// single empty name so the file still gets one line per ecotype.
pub fn ecotype_params(code: &str) -> Result<&'static [&'static str]> {
    let params: &'static [&'static str] = match code {
        "MZ" => &[
            "tbase", "topt", "ropt", "p20", "djti", "gdde", "dsgft", "rue", "kcan", "tsen", "cday",
        ],
        "SB" => SOYBEAN_ECO,
        "CO" => COTTON_ECO,
        "WH" | "BA" => SMALL_GRAIN_ECO,
        "RI" | "CN" => &[""],
        "SG" => &["tbase", "topt", "ropt", "gdde", "rue", "kcan", "stpc", "rtpc", "tilfc"],
        "ML" => &["tbase", "topt", "ropt", "djti", "gdde", "rue", "kcan"],
        other => return Err(TranslateError::UnsupportedCrop(other.to_string())),
    };
    Ok(params)
}
