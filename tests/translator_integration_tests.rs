//! Translator Integration Tests
//!
//! Runs whole translations from files on disk: experiment JSON plus a JSON or
//! CSV soil source, written out as X, SOL, CUL and ECO files.

use dssat_translator::{translate_batch, translate_cell, TranslatorConfig};
use std::fs;
use std::path::{Path, PathBuf};

const EXPERIMENT: &str = r#"{"experiments": [{
    "exname_o": "UFGA9501", "local_name": "Gainesville", "wst_id": "UFGA",
    "soil_id": "IBMZ910014", "fl_lat": "29.63", "fl_long": "-82.37",
    "dssat_sequence": {"data": [
        {"seqid": "1", "trno": "1", "sm": "1", "trt_name": "irrigated"},
        {"seqid": "2", "trno": "2", "sm": "1", "trt_name": "rainfed"}
    ]},
    "management": {"events": [
        {"event": "planting", "seqid": "1", "date": "19950226", "crid": "MZ",
         "cul_id": "IB0035", "cul_name": "McCurdy", "plpop": "7.2", "plpoe": "7.2",
         "plma": "S", "plds": "R", "plrs": "61", "pldp": "70"},
        {"event": "irrigation", "seqid": "1", "date": "19950301", "irop": "IR001", "irval": "13"},
        {"event": "fertilizer", "seqid": "1", "date": "19950226", "fecd": "FE005",
         "feacd": "AP002", "fedep": "10", "feamn": "60", "fe_name": "urea"},
        {"event": "harvest", "seqid": "1", "date": "19950715"},
        {"event": "planting", "seqid": "2", "date": "19950226", "crid": "MZ",
         "cul_id": "IB0035", "cul_name": "McCurdy", "plpop": "7.2", "plpoe": "7.2",
         "plma": "S", "plds": "R", "plrs": "61", "pldp": "70"}
    ]},
    "initial_conditions": {"icdat": "19950220", "icpcr": "MZ", "frac_full": "0.6"},
    "dssat_simulation_control": {"data": [
        {"sm": "1", "general": {"nyers": "1", "nreps": "1", "start": "S", "rseed": "2150",
         "sname": "integration"}}
    ]},
    "cultivar": [{"seqid": "1", "p1": 200, "p2": 0.3}, {"seqid": "2", "p1": 200, "p2": 0.3}],
    "cultivar_mods": [{"seqid": "2", "scale_p1": 1.1}],
    "ecotype": [{"seqid": "1", "tbase": 8, "topt": 34}]
}]}"#;

const SOIL_JSON: &str = r#"{"soils": [{
    "soil_id": "IBMZ910014", "sl_source": "Gainesville", "sltx": "S", "sldp": 180,
    "soil_name": "Millhopper Fine Sand", "sl_loc_3": "USA", "soil_lat": 29.63,
    "soil_long": -82.37, "salb": 0.18, "slu1": 2, "sldr": 0.65, "slro": 60,
    "slnf": 1, "slpf": 0.92,
    "soilLayer": [
        {"sllb": 5, "slll": 0.023, "sdul": 0.086, "ssat": 0.23, "srgf": 1, "sksat": 7.4,
         "sbdm": 1.36, "sloc": 0.9, "slcl": 0.9, "slsi": 1.1, "slhw": 6.5},
        {"sllb": 15, "slll": 0.023, "sdul": 0.086, "ssat": 0.23, "srgf": 1, "sksat": 7.4,
         "sbdm": 1.4, "sloc": 0.69, "slcl": 0.9, "slsi": 1.1, "slhw": 6.5}
    ]
}]}"#;

const SOIL_CSV: &str = "soil_id,depth,sl_source,sltx,slll,sdul,ssat,sloc\n\
IBMZ910014,5,Gainesville,S,0.023,0.086,0.23,0.9\n\
IBMZ910014,15,Gainesville,S,0.023,0.086,0.23,0.69\n";

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dssat_translator_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_in(dir: &Path, soil_file: &str) -> TranslatorConfig {
    TranslatorConfig {
        efile: dir.join("exp.json"),
        sfile: dir.join(soil_file),
        xfile: dir.join("UFGA9501.MZX"),
        sol_file: dir.join("soil.SOL"),
        cul_file: Some(dir.join("MZCER045.CUL")),
        eco_file: dir.join("MZCER045.ECO"),
        ..Default::default()
    }
}

#[test]
fn test_full_translation_writes_all_files() {
    let dir = scratch("full");
    fs::write(dir.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(dir.join("soil.json"), SOIL_JSON).unwrap();
    let config = config_in(&dir, "soil.json");

    let report = translate_cell("29.63/-82.37", &config);
    assert!(report.is_ok(), "{:?}", report.result.err());

    let x = fs::read_to_string(&config.xfile).unwrap();
    for section in [
        "*EXP.DETAILS: UFGA9501",
        "*TREATMENTS",
        "*CULTIVARS",
        "*FIELDS",
        "*INITIAL CONDITIONS",
        "*PLANTING DETAILS",
        "*IRRIGATION AND WATER MANAGEMENT",
        "*FERTILIZERS (INORGANIC)",
        "*HARVEST DETAILS",
        "*SIMULATION CONTROLS",
    ] {
        assert!(x.contains(section), "missing {}", section);
    }
    // sections follow the file order
    let order: Vec<usize> = ["*TREATMENTS", "*CULTIVARS", "*FIELDS", "*PLANTING DETAILS", "*SIMULATION CONTROLS"]
        .iter()
        .map(|s| x.find(s).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(!x.contains("*ENVIRONMENT MODIFICATIONS"));
    assert!(x.contains("CC0000"));
    assert!(x.contains("CC0001"));
    assert!(x.contains("SL00000001"));

    let sol = fs::read_to_string(&config.sol_file).unwrap();
    assert!(sol.starts_with("*SL00000001"));
    assert_eq!(sol.matches("*SL0000000").count(), 1);

    let cul = fs::read_to_string(config.cul_file.as_ref().unwrap()).unwrap();
    assert!(cul.starts_with("$CULTIVARS:MZCER045.010115"));
    assert!(cul.contains("CC0000 Generic0000          . 000001"));
    assert!(cul.contains("CC0001 Generic0001"));

    let eco = fs::read_to_string(&config.eco_file).unwrap();
    assert!(eco.starts_with("$ECOTYPES:MZCER045.010115"));
    assert!(eco.contains("000001 Generic0001"));

    let docs = report.result.unwrap();
    assert!(docs.modifier_errors.is_empty());
}

#[test]
fn test_csv_soil_source() {
    let dir = scratch("csv");
    fs::write(dir.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(dir.join("soil.csv"), SOIL_CSV).unwrap();
    let mut config = config_in(&dir, "soil.csv");
    config.cul_file = None;

    let report = translate_cell("csv", &config);
    assert!(report.is_ok(), "{:?}", report.result.err());
    let docs = report.result.unwrap();
    assert!(docs.sol.starts_with("*SL00000001  Gainesville"));
    assert!(docs.cul.is_empty());
    assert!(!config.eco_file.exists());
    assert!(docs.xfile.contains("IB0035"));
}

#[test]
fn test_unknown_soil_fails_cell_only() {
    let good = scratch("batch_good");
    fs::write(good.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(good.join("soil.json"), SOIL_JSON).unwrap();

    let bad = scratch("batch_bad");
    fs::write(bad.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(bad.join("soil.json"), r#"{"soils": []}"#).unwrap();

    let reports = translate_batch(&[
        ("good".to_string(), config_in(&good, "soil.json")),
        ("bad".to_string(), config_in(&bad, "soil.json")),
    ]);
    assert_eq!(reports.len(), 2);
    assert!(reports[0].is_ok());
    assert!(!reports[1].is_ok());
    assert!(!bad.join("UFGA9501.MZX").exists());
}

#[test]
fn test_legacy_dates() {
    let dir = scratch("legacy");
    fs::write(dir.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(dir.join("soil.json"), SOIL_JSON).unwrap();
    let mut config = config_in(&dir, "soil.json");
    config.y2k = false;

    let docs = translate_cell("legacy", &config).result.unwrap();
    // planting on 1995-02-26 is day 57
    assert!(docs.xfile.contains("1       95057"));
    assert!(!docs.xfile.contains("1995057"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_cultivar_file_is_replaced() {
    let dir = scratch("symlink");
    fs::write(dir.join("exp.json"), EXPERIMENT).unwrap();
    fs::write(dir.join("soil.json"), SOIL_JSON).unwrap();
    let shared = dir.join("shared.CUL");
    fs::write(&shared, "shared").unwrap();
    let config = config_in(&dir, "soil.json");
    std::os::unix::fs::symlink(&shared, config.cul_file.as_ref().unwrap()).unwrap();

    assert!(translate_cell("symlink", &config).is_ok());
    assert_eq!(fs::read_to_string(&shared).unwrap(), "shared");
    let meta = fs::symlink_metadata(config.cul_file.as_ref().unwrap()).unwrap();
    assert!(!meta.file_type().is_symlink());
}
