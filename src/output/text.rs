use crate::model::Verdict;
use crate::output::OutputFormatter;
use std::io::Write;

/// Plain line-oriented listing, stable across runs on the same input.
pub struct TextOutput {
    /// Also list modules and skipped references.
    pub verbose: bool,
}

impl TextOutput {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputFormatter for TextOutput {
    fn format<W: Write>(&self, verdict: &Verdict, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Verdict: {}", verdict.status)?;

        if self.verbose {
            writeln!(writer, "Modules: {}", verdict.modules.len())?;
            for module in &verdict.modules {
                write!(
                    writer,
                    "  {} ({} public, {} internal)",
                    module.name, module.public_units, module.internal_units
                )?;
                if module.depends_on.is_empty() {
                    writeln!(writer)?;
                } else {
                    writeln!(writer, " -> {}", module.depends_on.join(", "))?;
                }
            }
        }

        writeln!(writer, "Violations: {}", verdict.violations.len())?;
        for violation in &verdict.violations {
            writeln!(writer, "  {}", violation)?;
        }

        writeln!(writer, "Cycles: {}", verdict.cycles.len())?;
        for cycle in &verdict.cycles {
            writeln!(writer, "  {}", cycle)?;
        }

        if self.verbose && !verdict.unresolved.is_empty() {
            writeln!(writer, "Skipped references: {}", verdict.unresolved.len())?;
            for reference in &verdict.unresolved {
                writeln!(writer, "  {} -> {}", reference.unit, reference.symbol)?;
            }
        }

        Ok(())
    }
}
