//! Sales Engine
//!
//! Validates and executes one sale at a time against the hatchery state and
//! the period's labor pool.
//!
//! # Sale Flow
//!
//! ```text
//! (product, quantity)
//!   → product exists?          → UnknownProduct
//!   → quantity > 0?            → InvalidQuantity
//!   → quantity <= demand?      → InsufficientDemand
//!   → labor (x 2/3 if a specialist exists) <= remaining?
//!                              → InsufficientLabor
//!   → every resource covered by the pool?
//!                              → InsufficientResources (all shortfalls)
//!   → commit: labor, site stock (priority order), cash, demand, ledger
//! ```
//!
//! Validation ([`quote_sale`]) only borrows the state immutably and produces a
//! [`SalePlan`]; the plan is then applied in one step. A rejected sale
//! therefore cannot leave partial changes behind.
//!
//! # Critical Invariants
//!
//! - **Atomicity**: all of labor, stock, cash, demand and ledger change, or none
//! - **Ordering**: each sale sees the labor and stock left by earlier sales
//! - **Monotonic pool**: labor and stock only shrink during trading

use crate::models::resource::{PerResource, ResourceKind};
use crate::models::state::HatcheryState;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Per-unit labor multiplier when at least one specialist matches the product
pub const SPECIALIST_SPEEDUP: f64 = 2.0 / 3.0;

/// A resource the pool cannot cover for a requested sale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceShortfall {
    pub resource: ResourceKind,
    pub required: f64,
    pub available: f64,
}

/// Broad class of a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The request itself is malformed (unknown product, bad quantity)
    InputValidation,
    /// The request is well-formed but a limit is exceeded
    ConstraintViolation,
}

/// Reasons a sale is refused
///
/// A rejection never changes state; the caller may retry with other input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleRejection {
    #[error("Unknown product '{product}'")]
    UnknownProduct { product: String },

    #[error("Quantity must be a positive number, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Insufficient demand for {product}: requested {requested}, available {available} units")]
    InsufficientDemand {
        product: String,
        requested: i64,
        available: u32,
    },

    #[error("Insufficient technician time: required {required:.2} days, available {available:.2} days")]
    InsufficientLabor { required: f64, available: f64 },

    #[error("Insufficient resources: {}", describe_shortfalls(.shortfalls))]
    InsufficientResources { shortfalls: Vec<ResourceShortfall> },
}

impl SaleRejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            SaleRejection::UnknownProduct { .. } | SaleRejection::InvalidQuantity { .. } => {
                RejectionKind::InputValidation
            }
            SaleRejection::InsufficientDemand { .. }
            | SaleRejection::InsufficientLabor { .. }
            | SaleRejection::InsufficientResources { .. } => RejectionKind::ConstraintViolation,
        }
    }
}

fn describe_shortfalls(shortfalls: &[ResourceShortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| {
            format!(
                "{} need {:.2} {}, available {:.2} {}",
                s.resource,
                s.required,
                s.resource.unit(),
                s.available,
                s.resource.unit()
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Technician days available in the current period
///
/// Fixed when trading opens; only ever consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborPool {
    initial: f64,
    remaining: f64,
}

impl LaborPool {
    pub fn new(labor_days: f64) -> Self {
        let days = labor_days.max(0.0);
        Self {
            initial: days,
            remaining: days,
        }
    }

    /// Pool for a period: headcount x days per technician
    pub fn for_state(state: &HatcheryState, days_per_technician: f64) -> Self {
        Self::new(state.roster().labor_days(days_per_technician))
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn used(&self) -> f64 {
        self.initial - self.remaining
    }

    fn consume(&mut self, days: f64) {
        self.remaining = (self.remaining - days).max(0.0);
    }
}

/// A validated sale, ready to commit
#[derive(Debug, Clone, PartialEq)]
pub struct SalePlan {
    product: String,
    quantity: u32,
    unit_price: i64,
    labor_days: f64,
    specialist_bonus: bool,
    resources: PerResource<f64>,
}

impl SalePlan {
    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quantity times unit price, saturating at `i64::MAX`
    pub fn revenue(&self) -> i64 {
        (self.quantity as i64).saturating_mul(self.unit_price)
    }

    /// Total labor-days the sale consumes
    pub fn labor_days(&self) -> f64 {
        self.labor_days
    }

    pub fn specialist_bonus(&self) -> bool {
        self.specialist_bonus
    }

    /// Stock drawn from the pool per kind
    pub fn resources(&self) -> &PerResource<f64> {
        &self.resources
    }
}

/// Record of a committed sale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleReceipt {
    /// Unique sale identifier (UUID)
    pub id: String,
    pub product: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub revenue: i64,
    pub labor_days: f64,
    pub specialist_bonus: bool,
    pub resources: PerResource<f64>,
    /// Labor-days left in the pool after this sale
    pub labor_remaining: f64,
}

/// Validate a sale without changing anything
///
/// Checks run in order and the first failure is returned, except that every
/// short resource is reported together.
///
/// # Example
///
/// ```rust
/// use hatchery_simulator_core::sales::{quote_sale, LaborPool, SaleRejection};
/// use hatchery_simulator_core::{HatcheryState, PerResource, Product, ProductCatalog, StorageSite};
///
/// let catalog = ProductCatalog::new(vec![Product::new(
///     "Timpani", PerResource::new(50.0, 9.0, 2.0), 1.0, 10, 35_000,
/// )]);
/// let site = StorageSite::new(
///     "main", PerResource::new(20.0, 400.0, 200.0), PerResource::splat(0.0), PerResource::splat(0),
/// );
/// let state = HatcheryState::new(0, catalog, vec![site], vec![]);
/// let labor = LaborPool::new(45.0);
///
/// let plan = quote_sale(&state, &labor, "Timpani", 5).unwrap();
/// assert_eq!(plan.revenue(), 175_000);
///
/// let err = quote_sale(&state, &labor, "Timpani", 11).unwrap_err();
/// assert!(matches!(err, SaleRejection::InsufficientDemand { available: 10, .. }));
/// ```
pub fn quote_sale(
    state: &HatcheryState,
    labor: &LaborPool,
    product_name: &str,
    quantity: i64,
) -> Result<SalePlan, SaleRejection> {
    let product = state
        .catalog()
        .get(product_name)
        .ok_or_else(|| SaleRejection::UnknownProduct {
            product: product_name.to_string(),
        })?;

    if quantity <= 0 {
        return Err(SaleRejection::InvalidQuantity { quantity });
    }

    let demand_exceeded = || SaleRejection::InsufficientDemand {
        product: product_name.to_string(),
        requested: quantity,
        available: product.demand(),
    };
    let quantity = u32::try_from(quantity).map_err(|_| demand_exceeded())?;
    if quantity > product.demand() {
        return Err(demand_exceeded());
    }

    let specialist_bonus = state.roster().has_specialist(product_name);
    let mut per_unit_days = product.labor_days_per_unit();
    if specialist_bonus {
        per_unit_days *= SPECIALIST_SPEEDUP;
    }
    let labor_days = per_unit_days * quantity as f64;
    if labor_days > labor.remaining() {
        return Err(SaleRejection::InsufficientLabor {
            required: labor_days,
            available: labor.remaining(),
        });
    }

    let resources = PerResource::from_fn(|kind| product.requirement_for(kind, quantity));
    let shortfalls: Vec<ResourceShortfall> = resources
        .iter()
        .filter_map(|(kind, &required)| {
            let available = state.available(kind);
            (required > available).then_some(ResourceShortfall {
                resource: kind,
                required,
                available,
            })
        })
        .collect();
    if !shortfalls.is_empty() {
        return Err(SaleRejection::InsufficientResources { shortfalls });
    }

    Ok(SalePlan {
        product: product_name.to_string(),
        quantity,
        unit_price: product.price(),
        labor_days,
        specialist_bonus,
        resources,
    })
}

/// Apply a validated plan
///
/// The plan must have been quoted against this same state and pool with no
/// changes in between.
pub fn commit_sale(
    state: &mut HatcheryState,
    labor: &mut LaborPool,
    plan: SalePlan,
) -> SaleReceipt {
    labor.consume(plan.labor_days);

    for kind in ResourceKind::ALL {
        state.draw_from_pool(kind, plan.resources[kind]);
    }

    let revenue = plan.revenue();
    state.credit(revenue);
    if let Some(product) = state.catalog_mut().get_mut(&plan.product) {
        product.consume_demand(plan.quantity);
    }
    state.ledger_mut().record(&plan.product, plan.quantity);

    let receipt = SaleReceipt {
        id: Uuid::new_v4().to_string(),
        product: plan.product,
        quantity: plan.quantity,
        unit_price: plan.unit_price,
        revenue,
        labor_days: plan.labor_days,
        specialist_bonus: plan.specialist_bonus,
        resources: plan.resources,
        labor_remaining: labor.remaining(),
    };

    tracing::info!(
        sale_id = %receipt.id,
        product = %receipt.product,
        quantity = receipt.quantity,
        revenue = receipt.revenue,
        labor_days = receipt.labor_days,
        labor_remaining = receipt.labor_remaining,
        "sale committed"
    );

    receipt
}

/// Validate and, if every check passes, execute a sale
///
/// # Returns
///
/// - `Ok(SaleReceipt)` if the sale was committed
/// - `Err(SaleRejection)` if any check failed; **no state changes occur**
pub fn attempt_sale(
    state: &mut HatcheryState,
    labor: &mut LaborPool,
    product: &str,
    quantity: i64,
) -> Result<SaleReceipt, SaleRejection> {
    match quote_sale(state, labor, product, quantity) {
        Ok(plan) => Ok(commit_sale(state, labor, plan)),
        Err(rejection) => {
            tracing::debug!(product, quantity, %rejection, "sale rejected");
            Err(rejection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Product, ProductCatalog};
    use crate::models::site::StorageSite;
    use crate::models::staff::Technician;

    fn state() -> HatcheryState {
        let catalog = ProductCatalog::new(vec![Product::new(
            "Clef Fins",
            PerResource::new(100.0, 12.0, 2.0),
            2.0,
            25,
            25_000,
        )]);
        let site = StorageSite::new(
            "main",
            PerResource::new(20.0, 400.0, 200.0),
            PerResource::splat(0.0),
            PerResource::splat(0),
        );
        HatcheryState::new(0, catalog, vec![site], vec![])
    }

    #[test]
    fn test_unknown_product_checked_before_quantity() {
        let err = quote_sale(&state(), &LaborPool::new(45.0), "Goldfish", -1).unwrap_err();
        assert_eq!(
            err,
            SaleRejection::UnknownProduct {
                product: "Goldfish".to_string()
            }
        );
        assert_eq!(err.kind(), RejectionKind::InputValidation);
    }

    #[test]
    fn test_zero_quantity_is_invalid() {
        let err = quote_sale(&state(), &LaborPool::new(45.0), "Clef Fins", 0).unwrap_err();
        assert_eq!(err, SaleRejection::InvalidQuantity { quantity: 0 });
    }

    #[test]
    fn test_huge_quantity_is_demand_error() {
        let err =
            quote_sale(&state(), &LaborPool::new(45.0), "Clef Fins", i64::MAX).unwrap_err();
        assert!(matches!(
            err,
            SaleRejection::InsufficientDemand { available: 25, .. }
        ));
        assert_eq!(err.kind(), RejectionKind::ConstraintViolation);
    }

    #[test]
    fn test_revenue_saturates_on_extreme_price() {
        let catalog = ProductCatalog::new(vec![Product::new(
            "Gold Carp",
            PerResource::splat(0.0),
            0.0,
            10,
            i64::MAX / 2,
        )]);
        let s = HatcheryState::new(0, catalog, vec![], vec![]);
        let plan = quote_sale(&s, &LaborPool::new(45.0), "Gold Carp", 3).unwrap();
        assert_eq!(plan.revenue(), i64::MAX);
    }

    #[test]
    fn test_specialist_bonus_applies() {
        let mut s = state();
        s.hire(Technician::new("Ada", 50_000).with_specialization("Clef Fins"))
            .unwrap();
        let plan = quote_sale(&s, &LaborPool::new(45.0), "Clef Fins", 3).unwrap();
        assert!(plan.specialist_bonus());
        assert_eq!(plan.labor_days(), 2.0 * SPECIALIST_SPEEDUP * 3.0);
    }

    #[test]
    fn test_labor_consumed_on_commit() {
        let mut s = state();
        let mut labor = LaborPool::new(45.0);
        let receipt = attempt_sale(&mut s, &mut labor, "Clef Fins", 10).unwrap();

        assert_eq!(receipt.labor_days, 20.0);
        assert_eq!(labor.remaining(), 25.0);
        assert_eq!(labor.used(), 20.0);
        assert_eq!(receipt.labor_remaining, 25.0);
    }

    #[test]
    fn test_shortfall_message_lists_every_resource() {
        let rejection = SaleRejection::InsufficientResources {
            shortfalls: vec![
                ResourceShortfall {
                    resource: ResourceKind::Fertilizer,
                    required: 2.5,
                    available: 1.0,
                },
                ResourceShortfall {
                    resource: ResourceKind::Salt,
                    required: 50.0,
                    available: 0.0,
                },
            ],
        };
        let message = rejection.to_string();
        assert!(message.contains("fertilizer need 2.50 L, available 1.00 L"));
        assert!(message.contains("salt need 50.00 kg, available 0.00 kg"));
    }
}
