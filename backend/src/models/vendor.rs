//! Resource vendors
//!
//! A vendor is a stateless price list: minor units per unit of each resource.

use crate::core::money::charge_for;
use crate::models::resource::{PerResource, ResourceKind};
use serde::{Deserialize, Serialize};

/// A supplier with a fixed price per resource unit
///
/// # Example
/// ```
/// use hatchery_simulator_core::{PerResource, ResourceKind, Vendor};
///
/// let vendor = Vendor::new("Slippery Lakes", PerResource::new(30, 10, 5));
/// assert_eq!(vendor.purchase_cost(ResourceKind::Feed, 250.0), 2_500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    name: String,

    /// Price per unit (pence)
    prices: PerResource<i64>,
}

impl Vendor {
    pub fn new(name: impl Into<String>, prices: PerResource<i64>) -> Self {
        Self {
            name: name.into(),
            prices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self, kind: ResourceKind) -> i64 {
        self.prices[kind]
    }

    /// Cost of buying `quantity` units of `kind`, rounded to the nearest penny
    pub fn purchase_cost(&self, kind: ResourceKind, quantity: f64) -> i64 {
        charge_for(self.prices[kind], quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_purchase_rounds() {
        let vendor = Vendor::new("Scaly Wholesaler", PerResource::new(20, 40, 25));
        // 8.1 L at 20p = 162p
        assert_eq!(vendor.purchase_cost(ResourceKind::Fertilizer, 8.1), 162);
    }
}
