//! Hatchery Simulator Core - Rust Engine
//!
//! Quarterly simulation of a fish hatchery: technicians turn stored
//! fertilizer, feed and salt into fish sold against finite demand.
//!
//! # Architecture
//!
//! - **core**: Period counting and money helpers
//! - **models**: Domain types (StorageSite, Product, Technician, State)
//! - **sales**: Per-sale constraint engine (demand, labor, multi-site stock)
//! - **costs**: Period-end storage billing, depreciation, payroll, restock
//! - **orchestrator**: Period lifecycle, configuration and state digests
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (pence)
//! 2. A sale commits completely or not at all
//! 3. Site stock always lies within `[0, capacity]`

// Module declarations
pub mod core;
pub mod costs;
pub mod models;
pub mod orchestrator;
pub mod sales;

// Re-exports for convenience
pub use core::money::{charge_for, pounds};
pub use core::period::PeriodClock;
pub use costs::{
    bill_storage, depreciate_all, pay_roster, restock, Payroll, RestockOutcome, RestockReport,
    StorageBill,
};
pub use models::{
    event::{Event, EventLog},
    ledger::SaleLedger,
    product::{Product, ProductCatalog},
    resource::{PerResource, ResourceKind},
    site::StorageSite,
    staff::{Roster, StaffingError, Technician},
    state::HatcheryState,
    vendor::Vendor,
};
pub use orchestrator::{
    state_digest, HatcheryConfig, Orchestrator, PeriodOutcome, PeriodPhase, PeriodReport,
    SimulationError,
};
pub use sales::{attempt_sale, LaborPool, SaleReceipt, SaleRejection};
