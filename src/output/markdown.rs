use crate::model::{Verdict, VerdictStatus, qualify};
use crate::output::OutputFormatter;
use std::io::Write;

pub struct MarkdownOutput {
    pub project_name: String,
}

impl MarkdownOutput {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, verdict: &Verdict, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Module Boundaries: {}\n", self.project_name)?;

        let badge = match verdict.status {
            VerdictStatus::Pass => "✅ PASS",
            VerdictStatus::Fail => "❌ FAIL",
        };
        writeln!(writer, "**Verdict:** {}\n", badge)?;

        // Module Graph
        writeln!(writer, "## Modules\n")?;
        for module in &verdict.modules {
            let deps: Vec<_> = module
                .depends_on
                .iter()
                .map(|d| format!("`{}`", d))
                .collect();

            let counts = format!(
                "{} public, {} internal",
                module.public_units, module.internal_units
            );
            if deps.is_empty() {
                writeln!(writer, "- `{}` ({}, no dependencies)", module.name, counts)?;
            } else {
                writeln!(
                    writer,
                    "- `{}` ({}) → depends on: [{}]",
                    module.name,
                    counts,
                    deps.join(", ")
                )?;
            }
        }

        if verdict.passed() {
            writeln!(writer, "\n## No Violations Found\n")?;
            writeln!(
                writer,
                "No module reaches into another module's internals and there are no cycles."
            )?;
        } else {
            writeln!(writer, "\n## Findings\n")?;
        }

        if !verdict.violations.is_empty() {
            writeln!(writer, "### 🔴 Internal Access\n")?;
            for v in &verdict.violations {
                writeln!(
                    writer,
                    "- `{}` → `{}` ({})",
                    qualify(&v.from_module, &v.from_unit),
                    qualify(&v.to_module, &v.to_unit),
                    v.reason
                )?;
            }
            writeln!(
                writer,
                "\n→ Go through the public API of the target module instead.\n"
            )?;
        }

        if !verdict.cycles.is_empty() {
            writeln!(writer, "### 🔴 Module Cycles\n")?;
            for cycle in &verdict.cycles {
                writeln!(writer, "- {}", cycle.modules.join(" → "))?;
            }
            writeln!(
                writer,
                "\n→ Break the cycle by moving shared types into their own module or inverting a dependency.\n"
            )?;
        }

        if !verdict.unresolved.is_empty() {
            writeln!(writer, "### 🔵 Skipped References\n")?;
            for (i, r) in verdict.unresolved.iter().enumerate() {
                if i == 10 {
                    writeln!(
                        writer,
                        "- ... and {} more",
                        verdict.unresolved.len() - 10
                    )?;
                    break;
                }
                writeln!(writer, "- `{}` → `{}`", r.unit, r.symbol)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CycleReport, ModuleSummary, UnresolvedReference};

    fn module(name: &str, deps: &[&str]) -> ModuleSummary {
        ModuleSummary {
            name: name.to_string(),
            public_units: 1,
            internal_units: 0,
            depends_on: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_pass_report() {
        let verdict = Verdict::new(
            vec![],
            vec![],
            vec![],
            vec![module("inventory", &["orders"]), module("orders", &[])],
        );

        let md = MarkdownOutput::new("bookstore").render(&verdict).unwrap();
        assert!(md.starts_with("# Module Boundaries: bookstore\n"));
        assert!(md.contains("**Verdict:** ✅ PASS"));
        assert!(md.contains("- `inventory` (1 public, 0 internal) → depends on: [`orders`]"));
        assert!(md.contains("- `orders` (1 public, 0 internal, no dependencies)"));
        assert!(md.contains("## No Violations Found"));
    }

    #[test]
    fn test_skipped_references_truncated() {
        let unresolved = (0..12)
            .map(|i| UnresolvedReference {
                module: "orders".to_string(),
                unit: "orders.OrderService".to_string(),
                symbol: format!("lib.Symbol{:02}", i),
            })
            .collect();
        let verdict = Verdict::new(
            vec![],
            vec![CycleReport::from_members(vec!["a".to_string(), "b".to_string()])],
            unresolved,
            vec![],
        );

        let md = MarkdownOutput::new("p").render(&verdict).unwrap();
        assert!(md.contains("- a → b → a"));
        assert!(md.contains("`lib.Symbol09`"));
        assert!(!md.contains("`lib.Symbol10`"));
        assert!(md.contains("- ... and 2 more"));
    }
}
