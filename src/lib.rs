pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod input;
pub mod model;
pub mod output;
pub mod style;

pub use analysis::AnalysisError;
pub use api::{ModgateError, VerifyOptions, verify, verify_path};
pub use cli::Cli;
pub use commands::{cmd_check, cmd_init};
pub use config::{Config, UnresolvedPolicy};
pub use model::{
    CompilationUnit, CycleReport, ModuleSummary, UnresolvedReference, Verdict, VerdictStatus,
    Violation, ViolationReason, Visibility,
};
