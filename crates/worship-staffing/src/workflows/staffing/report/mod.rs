mod builder;
pub mod views;

pub use builder::{AnalysisResult, SatisfiedRequirement};

pub(crate) use builder::build_report;
