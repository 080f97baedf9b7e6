//! Analysis results and job lifecycle

pub mod result;
pub mod state;

pub use result::{Key, KeyEstimate};
pub use state::AnalysisState;
