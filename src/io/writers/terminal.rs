use crate::core::{MiningOutcome, MiningStats};
use crate::io::output::{format_price, OutputWriter};
use colored::*;
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, stats: &MiningStats) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "         FREQUENT ITEMSET REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(
            self.writer,
            "Transactions: {}   Distinct items: {}",
            stats.transactions.to_string().bold(),
            stats.distinct_items.to_string().bold()
        )?;
        match stats.anchor_item {
            Some(anchor) => writeln!(self.writer, "Anchor item: {}", anchor.to_string().green())?,
            None => writeln!(self.writer, "Anchor item: {}", "none".yellow())?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_level_summary(&mut self, stats: &MiningStats) -> anyhow::Result<()> {
        if stats.levels.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "Search".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        for level in &stats.levels {
            let survivors = if level.survivors == 0 {
                level.survivors.to_string().red()
            } else {
                level.survivors.to_string().green()
            };
            writeln!(
                self.writer,
                "  k={:<3} candidates {:>6}   pruned {:>6}   frequent {:>6}",
                level.length, level.generated, level.pruned, survivors
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, outcome: &MiningOutcome) -> anyhow::Result<()> {
        self.write_header(&outcome.stats)?;
        self.write_level_summary(&outcome.stats)?;

        if outcome.results.is_empty() {
            writeln!(self.writer, "{}", "No frequent itemsets found.".yellow())?;
            self.writer.flush()?;
            return Ok(());
        }

        for (length, records) in outcome.results.levels() {
            writeln!(
                self.writer,
                "{} {}",
                format!("Length {length}").bold(),
                format!("({} itemsets)", records.len()).dimmed()
            )?;
            for record in records {
                writeln!(
                    self.writer,
                    "  {:<24} support {:>6}  tail {:>6}  avg price {:>5}",
                    record.itemset.to_string(),
                    record.support_count,
                    record.tail_count,
                    format_price(record.average_price)
                )?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FrequentRecord, Itemset, LevelResults};

    #[test]
    fn reports_each_itemset() {
        colored::control::set_override(false);
        let mut results = LevelResults::new();
        results.record_level(
            1,
            vec![FrequentRecord {
                itemset: Itemset::new([3]),
                support_count: 2,
                tail_count: 4,
                average_price: 1.0,
            }],
        );
        let outcome = MiningOutcome {
            results,
            ..MiningOutcome::default()
        };

        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_results(&outcome).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Length 1"));
        assert!(text.contains("(3)"));
        assert!(text.contains("support      2"));
    }

    #[test]
    fn reports_empty_result() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_results(&MiningOutcome::default())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("No frequent itemsets found."));
        assert!(text.contains("Anchor item: none"));
    }
}
