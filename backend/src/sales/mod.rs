//! Sales Module
//!
//! The per-sale constraint engine: demand, labor and multi-site stock are
//! checked together and a sale either commits completely or not at all.
//!
//! # Example
//!
//! ```rust
//! use hatchery_simulator_core::sales::{attempt_sale, LaborPool};
//! use hatchery_simulator_core::{HatcheryState, PerResource, Product, ProductCatalog, StorageSite};
//!
//! let catalog = ProductCatalog::new(vec![Product::new(
//!     "Timpani", PerResource::new(50.0, 9.0, 2.0), 1.0, 10, 35_000,
//! )]);
//! let site = StorageSite::new(
//!     "main", PerResource::new(20.0, 400.0, 200.0), PerResource::splat(0.0), PerResource::splat(0),
//! );
//! let mut state = HatcheryState::new(0, catalog, vec![site], vec![]);
//! let mut labor = LaborPool::new(45.0);
//!
//! let receipt = attempt_sale(&mut state, &mut labor, "Timpani", 5).unwrap();
//! assert_eq!(receipt.revenue, 175_000);
//! assert_eq!(state.cash(), 175_000);
//! assert_eq!(state.catalog().demand("Timpani"), Some(5));
//! assert_eq!(state.ledger().units_sold("Timpani"), 5);
//! ```

pub mod engine;

pub use engine::{
    attempt_sale, commit_sale, quote_sale, LaborPool, RejectionKind, ResourceShortfall,
    SalePlan, SaleReceipt, SaleRejection, SPECIALIST_SPEEDUP,
};
