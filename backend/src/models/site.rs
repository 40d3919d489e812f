//! Storage site (warehouse) model
//!
//! A site holds stock of every resource kind up to a fixed capacity. Stock
//! shrinks through sale consumption and periodic depreciation, and grows
//! through refills.
//!
//! # Critical Invariants
//!
//! 1. `0 <= stock[r] <= capacity[r]` for every kind, at all times
//! 2. Depreciation rounds the loss UP (`ceil(stock * rate)`)
//! 3. Refill never exceeds capacity; the undelivered remainder is returned

use crate::core::money::charge_for;
use crate::models::resource::{PerResource, ResourceKind};
use serde::{Deserialize, Serialize};

/// A named warehouse holding resource stock
///
/// Sites start full. Storage cost rates are minor units per unit of stock.
///
/// # Example
/// ```
/// use hatchery_simulator_core::{PerResource, ResourceKind, StorageSite};
///
/// let mut site = StorageSite::new(
///     "main",
///     PerResource::new(20.0, 400.0, 200.0),
///     PerResource::new(0.4, 0.1, 0.0),
///     PerResource::new(10, 100, 100),
/// );
/// assert_eq!(site.stock(ResourceKind::Feed), 400.0);
///
/// site.draw(ResourceKind::Feed, 150.0);
/// let leftover = site.refill(ResourceKind::Feed, 200.0);
/// assert_eq!(site.stock(ResourceKind::Feed), 400.0);
/// assert_eq!(leftover, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSite {
    /// Unique site name (e.g. "main")
    name: String,

    /// Current stock per kind
    stock: PerResource<f64>,

    /// Maximum stock per kind
    capacity: PerResource<f64>,

    /// Fraction of stock lost per period, in [0, 1]
    depreciation_rate: PerResource<f64>,

    /// Minor units charged per unit of stock held at billing time
    storage_cost_rate: PerResource<i64>,
}

impl StorageSite {
    /// Create a full site
    ///
    /// # Panics
    /// Panics if any capacity is negative or any depreciation rate is
    /// outside [0, 1]
    pub fn new(
        name: impl Into<String>,
        capacity: PerResource<f64>,
        depreciation_rate: PerResource<f64>,
        storage_cost_rate: PerResource<i64>,
    ) -> Self {
        for kind in ResourceKind::ALL {
            assert!(capacity[kind] >= 0.0, "capacity must be non-negative");
            assert!(
                (0.0..=1.0).contains(&depreciation_rate[kind]),
                "depreciation_rate must be within [0, 1]"
            );
        }
        Self {
            name: name.into(),
            stock: capacity,
            capacity,
            depreciation_rate,
            storage_cost_rate,
        }
    }

    /// Replace the opening stock, clamped into `[0, capacity]`
    pub fn with_stock(mut self, stock: PerResource<f64>) -> Self {
        for kind in ResourceKind::ALL {
            self.stock[kind] = stock[kind].clamp(0.0, self.capacity[kind]);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self, kind: ResourceKind) -> f64 {
        self.stock[kind]
    }

    pub fn stocks(&self) -> &PerResource<f64> {
        &self.stock
    }

    pub fn capacity(&self, kind: ResourceKind) -> f64 {
        self.capacity[kind]
    }

    pub fn capacities(&self) -> &PerResource<f64> {
        &self.capacity
    }

    pub fn depreciation_rate(&self, kind: ResourceKind) -> f64 {
        self.depreciation_rate[kind]
    }

    pub fn storage_cost_rate(&self, kind: ResourceKind) -> i64 {
        self.storage_cost_rate[kind]
    }

    /// Room left before `kind` reaches capacity
    pub fn free_space(&self, kind: ResourceKind) -> f64 {
        self.capacity[kind] - self.stock[kind]
    }

    /// Apply one period of depreciation to every kind
    ///
    /// For each kind, `ceil(stock * rate)` is removed, floored at zero stock.
    /// Returns the quantity actually removed per kind.
    ///
    /// # Example
    /// ```
    /// use hatchery_simulator_core::{PerResource, ResourceKind, StorageSite};
    ///
    /// let mut site = StorageSite::new(
    ///     "main",
    ///     PerResource::new(20.0, 400.0, 200.0),
    ///     PerResource::new(0.4, 0.1, 0.0),
    ///     PerResource::splat(0),
    /// );
    /// let lost = site.depreciate();
    /// assert_eq!(lost.fertilizer, 8.0);
    /// assert_eq!(site.stock(ResourceKind::Feed), 360.0);
    /// assert_eq!(site.stock(ResourceKind::Salt), 200.0);
    /// ```
    pub fn depreciate(&mut self) -> PerResource<f64> {
        let mut lost = PerResource::splat(0.0);
        for kind in ResourceKind::ALL {
            let before = self.stock[kind];
            let loss = (before * self.depreciation_rate[kind]).ceil();
            let after = (before - loss).max(0.0);
            self.stock[kind] = after;
            lost[kind] = before - after;
        }
        lost
    }

    /// Add up to `amount` of `kind`, capped at capacity
    ///
    /// Returns the part of `amount` that did not fit. A non-positive amount
    /// adds nothing.
    pub fn refill(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let space = self.free_space(kind).max(0.0);
        if amount >= space {
            self.stock[kind] = self.capacity[kind];
            amount - space
        } else {
            self.stock[kind] = (self.stock[kind] + amount).min(self.capacity[kind]);
            0.0
        }
    }

    /// Remove up to `amount` of `kind`
    ///
    /// Returns the quantity actually removed (never more than current stock).
    pub fn draw(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let taken = amount.min(self.stock[kind]);
        self.stock[kind] = (self.stock[kind] - taken).max(0.0);
        taken
    }

    /// Storage charge per kind for the stock currently held
    pub fn storage_costs(&self) -> PerResource<i64> {
        PerResource::from_fn(|kind| charge_for(self.storage_cost_rate[kind], self.stock[kind]))
    }

    /// Total storage charge for the stock currently held
    pub fn storage_cost(&self) -> i64 {
        self.storage_costs().total()
    }
}
