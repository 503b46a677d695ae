//! Acceptance predicates applied to every candidate.

use super::oracle::SupportOracle;
use crate::core::{FrequentRecord, Itemset};
use std::fmt;
use tracing::trace;

/// Absolute slack for the SDC and AVPT comparisons, whose subtraction and
/// averaging can leave a value that equals its threshold on paper a few ulps
/// off. Minimum support is a single division and is compared exactly.
pub const TOLERANCE: f64 = 1e-9;

pub fn at_least(value: f64, threshold: f64) -> bool {
    value + TOLERANCE >= threshold
}

pub fn at_most(value: f64, threshold: f64) -> bool {
    value <= threshold + TOLERANCE
}

/// Which predicate turned a candidate away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MinimumSupport,
    SupportDifference,
    AveragePrice,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rejection::MinimumSupport => "minimum support",
            Rejection::SupportDifference => "support difference",
            Rejection::AveragePrice => "average price",
        };
        f.write_str(name)
    }
}

pub struct ConstraintEvaluator<'o, 'a> {
    oracle: &'o SupportOracle<'a>,
}

impl<'o, 'a> ConstraintEvaluator<'o, 'a> {
    pub fn new(oracle: &'o SupportOracle<'a>) -> Self {
        Self { oracle }
    }

    /// Support ratio must reach the lowest MIS among the members.
    pub fn meets_min_support(&self, itemset: &Itemset, support_count: usize) -> bool {
        self.oracle.support_ratio(support_count) >= self.oracle.min_mis(itemset)
    }

    /// Spread of member singleton supports must stay within SDC.
    pub fn satisfies_sdc(&self, itemset: &Itemset) -> bool {
        if itemset.len() <= 1 {
            return true;
        }
        let (low, high) = itemset
            .iter()
            .map(|item| self.oracle.singleton_support(item))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), ratio| {
                (low.min(ratio), high.max(ratio))
            });
        at_most(high - low, self.oracle.params().sdc())
    }

    pub fn satisfies_avpt(&self, itemset: &Itemset) -> bool {
        at_least(
            self.oracle.average_price(itemset),
            self.oracle.params().avpt(),
        )
    }

    /// Run all three predicates, returning the support count on success.
    pub fn check(&self, itemset: &Itemset) -> Result<usize, Rejection> {
        let support_count = self.oracle.support_count(itemset);
        if !self.meets_min_support(itemset, support_count) {
            return Err(Rejection::MinimumSupport);
        }
        if !self.satisfies_sdc(itemset) {
            return Err(Rejection::SupportDifference);
        }
        if !self.satisfies_avpt(itemset) {
            return Err(Rejection::AveragePrice);
        }
        Ok(support_count)
    }

    pub fn evaluate(&self, itemset: &Itemset) -> Option<FrequentRecord> {
        match self.check(itemset) {
            Ok(support_count) => Some(self.oracle.record(itemset.clone(), support_count)),
            Err(reason) => {
                trace!(candidate = %itemset, %reason, "Rejected candidate");
                None
            }
        }
    }
}
