//! CLI command implementations

mod analyze;
mod plan;
mod run;

pub use analyze::AnalyzeCommand;
pub use plan::PlanCommand;
pub use run::RunCommand;
