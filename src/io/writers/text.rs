use crate::core::MiningOutcome;
use crate::io::output::{format_price, OutputWriter};
use std::io::Write;

/// The classic report layout:
///
/// ```text
/// (Length-2 1
/// (1 2) : 2 : 4 : 5
/// )
/// ```
pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_results(&mut self, outcome: &MiningOutcome) -> anyhow::Result<()> {
        for (length, records) in outcome.results.levels() {
            writeln!(self.writer, "(Length-{} {}", length, records.len())?;
            for record in records {
                writeln!(
                    self.writer,
                    "{} : {} : {} : {}",
                    record.itemset,
                    record.support_count,
                    record.tail_count,
                    format_price(record.average_price)
                )?;
            }
            writeln!(self.writer, ")")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
