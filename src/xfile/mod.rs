//! Experiment (X) file writer

pub mod generator;
pub mod sections;

pub use generator::XFileGenerator;
