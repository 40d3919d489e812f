//! Orchestrator - quarterly simulation loop
//!
//! Owns the hatchery state and sequences staffing, trading and period
//! billing. See `engine.rs` for the lifecycle.

pub mod config;
pub mod digest;
pub mod engine;

pub use config::{
    default_products, default_sites, default_vendors, HatcheryConfig, ProductConfig, SiteConfig,
    TechnicianConfig, VendorConfig,
};
pub use digest::{digest_of, state_digest, validate_state};
pub use engine::{
    BankruptcyStage, Orchestrator, PeriodOutcome, PeriodPhase, PeriodPlan, PeriodReport,
    PeriodSummary, SimulationError,
};
