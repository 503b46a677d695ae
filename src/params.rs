//! Per-item mining thresholds.
//!
//! MIS and price are each a two-tier lookup: explicit per-item overrides plus
//! a single "rest" value used for every other item. SDC and AVPT are scalars.

use crate::core::{Error, Item, Result};
use std::collections::HashMap;

pub fn default_mis_rest() -> f64 {
    0.01
}

pub fn default_price_rest() -> f64 {
    5.0
}

/// Overrides plus fallback for one per-item dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemValues {
    pub rest: f64,
    pub overrides: HashMap<Item, f64>,
}

impl ItemValues {
    pub fn with_rest(rest: f64) -> Self {
        Self {
            rest,
            overrides: HashMap::new(),
        }
    }

    pub fn get(&self, item: Item) -> f64 {
        self.overrides.get(&item).copied().unwrap_or(self.rest)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    mis: ItemValues,
    price: ItemValues,
    sdc: f64,
    avpt: f64,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self {
            mis: ItemValues::with_rest(default_mis_rest()),
            price: ItemValues::with_rest(default_price_rest()),
            sdc: 0.0,
            avpt: 0.0,
        }
    }
}

impl ParameterTable {
    pub fn builder() -> ParameterTableBuilder {
        ParameterTableBuilder::default()
    }

    /// Minimum item support for `item`, falling back to the rest value.
    pub fn mis(&self, item: Item) -> f64 {
        self.mis.get(item)
    }

    /// Price of `item`, falling back to the rest value.
    pub fn price(&self, item: Item) -> f64 {
        self.price.get(item)
    }

    pub fn sdc(&self) -> f64 {
        self.sdc
    }

    pub fn avpt(&self) -> f64 {
        self.avpt
    }

    pub fn mis_rest(&self) -> f64 {
        self.mis.rest
    }

    pub fn price_rest(&self) -> f64 {
        self.price.rest
    }

    pub fn mis_overrides(&self) -> &HashMap<Item, f64> {
        &self.mis.overrides
    }

    pub fn price_overrides(&self) -> &HashMap<Item, f64> {
        &self.price.overrides
    }

    /// Reject values the miner cannot compare against.
    pub fn validate(&self) -> Result<()> {
        let finite = |name: String, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(Error::Validation(format!("{name} must be finite, got {value}")))
            }
        };

        finite("MIS(rest)".into(), self.mis.rest)?;
        finite("Price(rest)".into(), self.price.rest)?;
        for (item, value) in &self.mis.overrides {
            finite(format!("MIS({item})"), *value)?;
        }
        for (item, value) in &self.price.overrides {
            finite(format!("Price({item})"), *value)?;
        }
        finite("SDC".into(), self.sdc)?;
        finite("AVPT".into(), self.avpt)?;

        if self.sdc < 0.0 {
            return Err(Error::Validation(format!(
                "SDC must not be negative, got {}",
                self.sdc
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParameterTableBuilder {
    table: ParameterTable,
}

impl ParameterTableBuilder {
    pub fn mis(mut self, item: Item, value: f64) -> Self {
        self.table.mis.overrides.insert(item, value);
        self
    }

    pub fn mis_rest(mut self, value: f64) -> Self {
        self.table.mis.rest = value;
        self
    }

    pub fn price(mut self, item: Item, value: f64) -> Self {
        self.table.price.overrides.insert(item, value);
        self
    }

    pub fn price_rest(mut self, value: f64) -> Self {
        self.table.price.rest = value;
        self
    }

    pub fn sdc(mut self, value: f64) -> Self {
        self.table.sdc = value;
        self
    }

    pub fn avpt(mut self, value: f64) -> Self {
        self.table.avpt = value;
        self
    }

    pub fn build(self) -> ParameterTable {
        self.table
    }
}
