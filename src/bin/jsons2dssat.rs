//! Translate experiment and soil JSON into DSSAT input files.
//!
//! Usage: `jsons2dssat [--config FILE] [--efile FILE] [--sfile FILE] ...`
//!
//! Settings come from the optional JSON config; flags override single keys.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dssat_translator::{translate_cell, TranslatorConfig};

#[derive(Parser, Debug)]
#[command(name = "jsons2dssat")]
#[command(about = "Write DSSAT experiment, soil, cultivar and ecotype files from JSON inputs")]
struct Args {
    /// Translator config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Experiment JSON
    #[arg(long)]
    efile: Option<PathBuf>,

    /// Soil source (JSON, CSV or Parquet)
    #[arg(long)]
    sfile: Option<PathBuf>,

    /// Experiment file output
    #[arg(long = "xfile")]
    xfile: Option<PathBuf>,

    /// Soil file output
    #[arg(long = "solfile")]
    sol_file: Option<PathBuf>,

    /// Cultivar file output; enables generated cultivars
    #[arg(long = "culfile")]
    cul_file: Option<PathBuf>,

    /// Ecotype file output
    #[arg(long = "ecofile")]
    eco_file: Option<PathBuf>,

    /// Cultivar file format version
    #[arg(long)]
    version: Option<String>,

    /// Derive soil hydraulics from texture
    #[arg(long)]
    pfcn: bool,

    /// Two-digit years in the experiment file
    #[arg(long)]
    no_y2k: bool,

    /// Label used in log messages, e.g. `lat/lon`
    #[arg(long, default_value = "0/0")]
    cell: String,
}

impl Args {
    fn config(&self) -> anyhow::Result<TranslatorConfig> {
        let mut config = match &self.config {
            Some(path) => TranslatorConfig::load(path)?,
            None => TranslatorConfig::default(),
        };
        if let Some(p) = &self.efile {
            config.efile = p.clone();
        }
        if let Some(p) = &self.sfile {
            config.sfile = p.clone();
        }
        if let Some(p) = &self.xfile {
            config.xfile = p.clone();
        }
        if let Some(p) = &self.sol_file {
            config.sol_file = p.clone();
        }
        if let Some(p) = &self.cul_file {
            config.cul_file = Some(p.clone());
        }
        if let Some(p) = &self.eco_file {
            config.eco_file = p.clone();
        }
        if let Some(v) = &self.version {
            config.version = v.clone();
        }
        if self.pfcn {
            config.pfcn = true;
        }
        if self.no_y2k {
            config.y2k = false;
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dssat_translator=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match args.config() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{:#}", e);
            process::exit(1);
        }
    };

    tracing::info!(
        efile = %config.efile.display(),
        sfile = %config.sfile.display(),
        "translating cell {}",
        args.cell
    );
    let report = translate_cell(&args.cell, &config);
    if !report.is_ok() {
        process::exit(1);
    }
}
