//! DSSAT input translator
//!
//! Converts crop experiment data (treatments, management events, soil
//! profiles) into the fixed-width text inputs of the DSSAT crop model.
//!
//! - `model/`: typed experiment records
//! - `utils/`: fixed-width columns and date encodings
//! - `xref`: deduplicating section tables
//! - `soil/`: soil source, composite soils, pedotransfer, SOL writer
//! - `cultivar/`: crop tables, coefficient modifiers, CUL/ECO writers
//! - `assembler`: treatments and their section indices
//! - `xfile/`: experiment file sections
//! - `translator`: end-to-end driver

pub mod error;
pub mod model;
pub mod utils;
pub mod xref;
pub mod soil;
pub mod cultivar;
pub mod assembler;
pub mod xfile;
pub mod config;
pub mod translator;

// Re-export commonly used types
pub use assembler::{Assembly, AssemblyOptions};
pub use config::TranslatorConfig;
pub use error::{ModifierError, Result, TranslateError};
pub use model::ExperimentSet;
pub use soil::SoilCatalog;
pub use translator::{translate, translate_batch, translate_cell, write_outputs, CellReport, Documents};
pub use xfile::XFileGenerator;
