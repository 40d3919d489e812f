//! Hatchery State
//!
//! Represents the complete state of the hatchery between operations.
//! Contains the cash balance, product catalog, technician roster, the
//! priority-ordered storage sites, vendors and the current sales ledger.
//!
//! # Resource Pool
//!
//! The sites form one logical pool per resource kind. Availability checks use
//! the pool total; consumption and refills walk the sites in priority order
//! (the order they were given to [`HatcheryState::new`]), fully draining or
//! filling one site before touching the next.
//!
//! # Critical Invariants
//!
//! 1. **Stock bounds**: every site keeps `0 <= stock <= capacity`
//! 2. **Priority order**: site order never changes after construction
//! 3. **Negative cash is allowed**: it signals bankruptcy, it is not an error
//! 4. **Owned mutation**: demand, stock, cash and ledger change only through
//!    the sales engine and period-end operations

use crate::models::ledger::SaleLedger;
use crate::models::product::ProductCatalog;
use crate::models::resource::ResourceKind;
use crate::models::site::StorageSite;
use crate::models::staff::{Roster, StaffingError, Technician};
use crate::models::vendor::Vendor;
use serde::{Deserialize, Serialize};

/// Complete hatchery state
///
/// # Example
///
/// ```rust
/// use hatchery_simulator_core::{
///     HatcheryState, PerResource, Product, ProductCatalog, ResourceKind, StorageSite,
/// };
///
/// let catalog = ProductCatalog::new(vec![Product::new(
///     "Timpani",
///     PerResource::new(50.0, 9.0, 2.0),
///     1.0,
///     10,
///     35_000,
/// )]);
/// let sites = vec![
///     StorageSite::new("main", PerResource::splat(20.0), PerResource::splat(0.0), PerResource::splat(0)),
///     StorageSite::new("auxiliary", PerResource::splat(10.0), PerResource::splat(0.0), PerResource::splat(0)),
/// ];
///
/// let state = HatcheryState::new(1_000_000, catalog, sites, vec![]);
/// assert_eq!(state.available(ResourceKind::Feed), 30.0);
/// assert!(!state.is_bankrupt());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatcheryState {
    /// Cash balance (pence); negative means bankrupt
    cash: i64,

    catalog: ProductCatalog,

    roster: Roster,

    /// Storage sites in consumption/refill priority order
    sites: Vec<StorageSite>,

    vendors: Vec<Vendor>,

    /// Units sold in the current period
    ledger: SaleLedger,
}

impl HatcheryState {
    /// Create a state with an empty roster and ledger
    ///
    /// # Panics
    ///
    /// Panics if two sites or two vendors share a name
    pub fn new(
        cash: i64,
        catalog: ProductCatalog,
        sites: Vec<StorageSite>,
        vendors: Vec<Vendor>,
    ) -> Self {
        for (i, site) in sites.iter().enumerate() {
            assert!(
                !sites[..i].iter().any(|s| s.name() == site.name()),
                "Site {} already exists",
                site.name()
            );
        }
        for (i, vendor) in vendors.iter().enumerate() {
            assert!(
                !vendors[..i].iter().any(|v| v.name() == vendor.name()),
                "Vendor {} already exists",
                vendor.name()
            );
        }
        Self {
            cash,
            catalog,
            roster: Roster::new(),
            sites,
            vendors,
            ledger: SaleLedger::new(),
        }
    }

    // ========================================================================
    // Cash
    // ========================================================================

    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Cash strictly below zero
    pub fn is_bankrupt(&self) -> bool {
        self.cash < 0
    }

    pub(crate) fn credit(&mut self, amount: i64) {
        self.cash = self.cash.saturating_add(amount);
    }

    pub(crate) fn debit(&mut self, amount: i64) {
        self.cash = self.cash.saturating_sub(amount);
    }

    // ========================================================================
    // Catalog & Ledger
    // ========================================================================

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut ProductCatalog {
        &mut self.catalog
    }

    /// Restore every product's demand to its baseline
    pub fn reset_demand(&mut self) {
        self.catalog.reset_demand();
    }

    pub fn ledger(&self) -> &SaleLedger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut SaleLedger {
        &mut self.ledger
    }

    /// Start a fresh ledger for a new period
    pub fn reset_ledger(&mut self) {
        self.ledger.clear();
    }

    // ========================================================================
    // Roster
    // ========================================================================

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Hire a technician, checking the specialization against the catalog
    pub fn hire(&mut self, technician: Technician) -> Result<(), StaffingError> {
        if let Some(product) = technician.specialization() {
            if !self.catalog.contains(product) {
                return Err(StaffingError::UnknownSpecialization(product.to_string()));
            }
        }
        self.roster.hire(technician)
    }

    /// Dismiss a technician by name
    pub fn dismiss(&mut self, name: &str) -> Result<Technician, StaffingError> {
        self.roster.dismiss(name)
    }

    // ========================================================================
    // Storage Sites
    // ========================================================================

    /// Sites in priority order
    pub fn sites(&self) -> &[StorageSite] {
        &self.sites
    }

    pub(crate) fn sites_mut(&mut self) -> &mut [StorageSite] {
        &mut self.sites
    }

    pub fn site(&self, name: &str) -> Option<&StorageSite> {
        self.sites.iter().find(|s| s.name() == name)
    }

    /// Pool stock of `kind` across all sites
    pub fn available(&self, kind: ResourceKind) -> f64 {
        self.sites.iter().map(|s| s.stock(kind)).sum()
    }

    /// Pool capacity of `kind` across all sites
    pub fn total_capacity(&self, kind: ResourceKind) -> f64 {
        self.sites.iter().map(|s| s.capacity(kind)).sum()
    }

    /// Aggregate capacity minus aggregate stock, floored at zero
    pub fn shortfall(&self, kind: ResourceKind) -> f64 {
        (self.total_capacity(kind) - self.available(kind)).max(0.0)
    }

    /// Remove `amount` of `kind` from the sites in priority order
    ///
    /// Returns the quantity actually removed.
    pub(crate) fn draw_from_pool(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        let mut remaining = amount;
        let mut taken = 0.0;
        for site in &mut self.sites {
            if remaining <= 0.0 {
                break;
            }
            let used = site.draw(kind, remaining);
            remaining -= used;
            taken += used;
        }
        taken
    }

    /// Distribute `amount` of `kind` across the sites in priority order
    ///
    /// Each site is filled to capacity before the next one receives
    /// anything. Returns what did not fit anywhere. No cash changes hands.
    pub fn refill(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        let mut remaining = amount.max(0.0);
        for site in &mut self.sites {
            if remaining <= 0.0 {
                break;
            }
            remaining = site.refill(kind, remaining);
        }
        remaining
    }

    // ========================================================================
    // Vendors
    // ========================================================================

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn vendor(&self, name: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.name() == name)
    }
}
