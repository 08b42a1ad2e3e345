use crate::model::{Verdict, qualify};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonVerdict<'a> {
    status: String,
    violations: Vec<JsonViolation<'a>>,
    cycles: Vec<&'a [String]>,
    unresolved: Vec<JsonReference<'a>>,
    modules: Vec<JsonModule<'a>>,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    from_module: &'a str,
    to_module: &'a str,
    from_unit: &'a str,
    to_unit: &'a str,
    reason: String,
    message: String,
}

#[derive(Serialize)]
struct JsonReference<'a> {
    module: &'a str,
    unit: &'a str,
    symbol: &'a str,
}

#[derive(Serialize)]
struct JsonModule<'a> {
    name: &'a str,
    public_units: usize,
    internal_units: usize,
    depends_on: &'a [String],
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, verdict: &Verdict, writer: &mut W) -> std::io::Result<()> {
        let json_verdict = JsonVerdict {
            status: verdict.status.to_string(),
            violations: verdict
                .violations
                .iter()
                .map(|v| JsonViolation {
                    from_module: &v.from_module,
                    to_module: &v.to_module,
                    from_unit: &v.from_unit,
                    to_unit: &v.to_unit,
                    reason: v.reason.to_string(),
                    message: format!(
                        "{} must not use {}",
                        qualify(&v.from_module, &v.from_unit),
                        qualify(&v.to_module, &v.to_unit)
                    ),
                })
                .collect(),
            cycles: verdict.cycles.iter().map(|c| c.modules.as_slice()).collect(),
            unresolved: verdict
                .unresolved
                .iter()
                .map(|r| JsonReference {
                    module: &r.module,
                    unit: &r.unit,
                    symbol: &r.symbol,
                })
                .collect(),
            modules: verdict
                .modules
                .iter()
                .map(|m| JsonModule {
                    name: &m.name,
                    public_units: m.public_units,
                    internal_units: m.internal_units,
                    depends_on: &m.depends_on,
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&json_verdict).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}
