//! Report formats and the writer factory.

use crate::core::MiningOutcome;
use crate::io::writers::{JsonWriter, TerminalWriter, TextWriter};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain report, one block per itemset length
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
    /// Colored summary for interactive use
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, outcome: &MiningOutcome) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(format: OutputFormat, writer: Box<dyn Write + 'w>) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Average price as shown in reports: rounded to a whole unit.
pub fn format_price(average_price: f64) -> String {
    format!("{average_price:.0}")
}
