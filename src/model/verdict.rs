use super::{CycleReport, ModuleSummary, UnresolvedReference, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::Pass => write!(f, "PASS"),
            VerdictStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Outcome of one verification run.
///
/// Findings are kept in the order the rule engine produced them, which is
/// already sorted, so rendering a verdict twice gives identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub violations: Vec<Violation>,
    pub cycles: Vec<CycleReport>,
    /// References dropped under the skip policy. Warnings, not findings.
    pub unresolved: Vec<UnresolvedReference>,
    pub modules: Vec<ModuleSummary>,
}

impl Verdict {
    pub fn new(
        violations: Vec<Violation>,
        cycles: Vec<CycleReport>,
        unresolved: Vec<UnresolvedReference>,
        modules: Vec<ModuleSummary>,
    ) -> Self {
        let status = if violations.is_empty() && cycles.is_empty() {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        };

        Self {
            status,
            violations,
            cycles,
            unresolved,
            modules,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == VerdictStatus::Pass
    }

    /// Process exit code for CI: 0 on pass, 1 on fail.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }

    /// Restrict the verdict to a single module: violations it commits and
    /// cycles it takes part in. Returns None for an unknown module.
    pub fn for_module(&self, name: &str) -> Option<Verdict> {
        let summary = self.modules.iter().find(|m| m.name == name)?.clone();

        let violations = self
            .violations
            .iter()
            .filter(|v| v.from_module == name)
            .cloned()
            .collect();
        let cycles = self
            .cycles
            .iter()
            .filter(|c| c.contains(name))
            .cloned()
            .collect();
        let unresolved = self
            .unresolved
            .iter()
            .filter(|u| u.module == name)
            .cloned()
            .collect();

        Some(Verdict::new(violations, cycles, unresolved, vec![summary]))
    }
}
