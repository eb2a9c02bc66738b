//! Run orchestration and result reporting.
mod runner;
mod summary;


pub(crate) use runner::run_stress;
pub use summary::{SummaryReport, print_summary, summary_json, summary_lines};
