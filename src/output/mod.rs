mod json;
mod markdown;
mod text;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;
pub use text::TextOutput;

use crate::model::Verdict;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, verdict: &Verdict, writer: &mut W) -> std::io::Result<()>;

    /// Render into a string. Formatting into memory cannot fail on I/O.
    fn render(&self, verdict: &Verdict) -> std::io::Result<String> {
        let mut buffer = Vec::new();
        self.format(verdict, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
