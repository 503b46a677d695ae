//! Level-wise search driver.
//!
//! `Init -> Level2 -> LevelK(3) -> LevelK(4) -> ... -> Done`. The search
//! only moves upward and halts at the first level with no candidates or no
//! survivors.

use super::candidates::{init_pass, level2_candidates, level_k_candidates};
use super::constraints::ConstraintEvaluator;
use super::oracle::SupportOracle;
use crate::core::{FrequentRecord, Itemset, LevelStats, MiningOutcome, MiningStats, TransactionStore};
use crate::params::ParameterTable;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, info_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningPhase {
    Init,
    Level2,
    LevelK(usize),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningOptions {
    /// Evaluate the candidates of a level on the rayon pool.
    pub parallel: bool,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

pub struct Miner<'a> {
    store: &'a TransactionStore,
    params: &'a ParameterTable,
    options: MiningOptions,
}

impl<'a> Miner<'a> {
    pub fn new(store: &'a TransactionStore, params: &'a ParameterTable) -> Self {
        Self {
            store,
            params,
            options: MiningOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MiningOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(&self) -> MiningOutcome {
        let span = info_span!(
            "mining",
            transactions = self.store.len(),
            parallel = self.options.parallel,
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut outcome = MiningOutcome {
            stats: MiningStats {
                transactions: self.store.len(),
                distinct_items: self.store.distinct_items().len(),
                ..MiningStats::default()
            },
            ..MiningOutcome::default()
        };

        if self.store.is_empty() {
            debug!("Empty transaction store, nothing to mine");
            return outcome;
        }

        let oracle = SupportOracle::new(self.store, self.params);
        let mut phase = MiningPhase::Init;
        loop {
            let next = match phase {
                MiningPhase::Init => self.initial_level(&oracle, &mut outcome),
                MiningPhase::Level2 => self.second_level(&oracle, &mut outcome),
                MiningPhase::LevelK(k) => self.higher_level(&oracle, k, &mut outcome),
                MiningPhase::Done => break,
            };
            debug!(from = ?phase, to = ?next, "Phase transition");
            phase = next;
        }

        info!(
            levels = outcome.results.max_length().unwrap_or(0),
            itemsets = outcome.results.total_itemsets(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Mining complete"
        );
        outcome
    }

    fn initial_level(&self, oracle: &SupportOracle<'_>, outcome: &mut MiningOutcome) -> MiningPhase {
        let pass = init_pass(oracle);
        outcome.stats.anchor_item = pass.anchor;
        let generated = pass.ordered_items.len();
        self.finish_level(1, generated, 0, pass.frequent, MiningPhase::Level2, outcome)
    }

    fn second_level(&self, oracle: &SupportOracle<'_>, outcome: &mut MiningOutcome) -> MiningPhase {
        let candidates = match outcome.results.level(1) {
            Some(frequent) => level2_candidates(frequent, oracle),
            None => return MiningPhase::Done,
        };
        let survivors = self.evaluate(oracle, &candidates);
        self.finish_level(2, candidates.len(), 0, survivors, MiningPhase::LevelK(3), outcome)
    }

    fn higher_level(
        &self,
        oracle: &SupportOracle<'_>,
        k: usize,
        outcome: &mut MiningOutcome,
    ) -> MiningPhase {
        let batch = match outcome.results.level(k - 1) {
            Some(previous) => level_k_candidates(previous, k, self.params),
            None => return MiningPhase::Done,
        };
        if batch.candidates.is_empty() {
            outcome.stats.levels.push(LevelStats {
                length: k,
                generated: batch.generated,
                pruned: batch.pruned,
                survivors: 0,
            });
            debug!(k, generated = batch.generated, "No candidates survive pruning");
            return MiningPhase::Done;
        }
        let survivors = self.evaluate(oracle, &batch.candidates);
        self.finish_level(
            k,
            batch.generated,
            batch.pruned,
            survivors,
            MiningPhase::LevelK(k + 1),
            outcome,
        )
    }

    fn finish_level(
        &self,
        length: usize,
        generated: usize,
        pruned: usize,
        survivors: Vec<FrequentRecord>,
        next: MiningPhase,
        outcome: &mut MiningOutcome,
    ) -> MiningPhase {
        outcome.stats.levels.push(LevelStats {
            length,
            generated,
            pruned,
            survivors: survivors.len(),
        });
        if survivors.is_empty() {
            debug!(length, generated, "Level produced no frequent itemsets");
            return MiningPhase::Done;
        }
        info!(
            length,
            generated,
            pruned,
            frequent = survivors.len(),
            "Found frequent itemsets"
        );
        outcome.results.record_level(length, survivors);
        next
    }

    /// Candidate order is preserved in both modes.
    fn evaluate(&self, oracle: &SupportOracle<'_>, candidates: &[Itemset]) -> Vec<FrequentRecord> {
        let evaluator = ConstraintEvaluator::new(oracle);
        if self.options.parallel {
            candidates
                .par_iter()
                .filter_map(|candidate| evaluator.evaluate(candidate))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|candidate| evaluator.evaluate(candidate))
                .collect()
        }
    }
}

/// Mine `store` with default options.
pub fn mine(store: &TransactionStore, params: &ParameterTable) -> MiningOutcome {
    Miner::new(store, params).run()
}
