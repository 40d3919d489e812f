//! Per-period sales ledger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Units sold per product in the current period
///
/// Cleared at period start; only grows during the period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleLedger {
    units: BTreeMap<String, u32>,
}

impl SaleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, product: &str, quantity: u32) {
        *self.units.entry(product.to_string()).or_insert(0) += quantity;
    }

    pub(crate) fn clear(&mut self) {
        self.units.clear();
    }

    /// Units of `product` sold this period (0 if none)
    pub fn units_sold(&self, product: &str) -> u32 {
        self.units.get(product).copied().unwrap_or(0)
    }

    pub fn total_units(&self) -> u32 {
        self.units.values().sum()
    }

    /// `(product, units)` in product-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.units.iter().map(|(name, units)| (name.as_str(), *units))
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
