mod finding;
mod unit;
mod verdict;

pub use finding::{CycleReport, ModuleSummary, UnresolvedReference, Violation, ViolationReason, qualify};
pub use unit::{CompilationUnit, Placement, Visibility, package_of};
pub use verdict::{Verdict, VerdictStatus};
