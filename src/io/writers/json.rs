use crate::core::{FrequentRecord, Item, LevelStats, MiningOutcome};
use crate::io::output::OutputWriter;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    transactions: usize,
    distinct_items: usize,
    anchor_item: Option<Item>,
    levels: Vec<JsonLevel<'a>>,
    stats: &'a [LevelStats],
}

#[derive(Serialize)]
struct JsonLevel<'a> {
    length: usize,
    count: usize,
    itemsets: &'a [FrequentRecord],
}

impl<'a> From<&'a MiningOutcome> for JsonReport<'a> {
    fn from(outcome: &'a MiningOutcome) -> Self {
        Self {
            transactions: outcome.stats.transactions,
            distinct_items: outcome.stats.distinct_items,
            anchor_item: outcome.stats.anchor_item,
            levels: outcome
                .results
                .levels()
                .map(|(length, itemsets)| JsonLevel {
                    length,
                    count: itemsets.len(),
                    itemsets,
                })
                .collect(),
            stats: &outcome.stats.levels,
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, outcome: &MiningOutcome) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport::from(outcome))?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
