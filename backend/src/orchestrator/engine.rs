//! Orchestrator Engine
//!
//! Drives the quarterly period loop around the sales engine:
//!
//! ```text
//! For each quarter q:
//! 1. begin_period   - clear ledger, reset demand
//! 2. hire / dismiss - staffing changes (headcount bounds enforced)
//! 3. open_trading   - fix the labor pool (headcount x days per technician)
//! 4. attempt_sale   - repeated; each sale sees the previous ones
//! 5. close_period   - storage bill → bankrupt?
//!                     depreciation
//!                     payroll      → bankrupt?
//!                     restock      → bankrupt?
//! ```
//!
//! The orchestrator stops for good on bankruptcy (cash below zero) or after
//! the last configured quarter closes.
//!
//! # Example
//!
//! ```rust
//! use hatchery_simulator_core::orchestrator::{HatcheryConfig, Orchestrator, PeriodOutcome};
//!
//! let mut orchestrator = Orchestrator::new(HatcheryConfig::default()).unwrap();
//!
//! orchestrator.begin_period().unwrap();
//! orchestrator.hire("Ada", Some("Timpani")).unwrap();
//! orchestrator.open_trading().unwrap();
//!
//! let receipt = orchestrator.attempt_sale("Timpani", 5).unwrap();
//! assert_eq!(receipt.revenue, 175_000);
//!
//! let report = orchestrator.close_period("Slippery Lakes").unwrap();
//! assert_eq!(report.outcome, PeriodOutcome::Solvent);
//! assert!(orchestrator.is_finished());
//! ```

use crate::core::period::PeriodClock;
use crate::costs::{
    bill_storage, depreciate_all, pay_roster, restock, Payroll, RestockOutcome, RestockReport,
    SiteDepreciation, StorageBill,
};
use crate::models::event::{Event, EventLog};
use crate::models::product::{Product, ProductCatalog};
use crate::models::site::StorageSite;
use crate::models::staff::{StaffingError, Technician};
use crate::models::state::HatcheryState;
use crate::models::vendor::Vendor;
use crate::orchestrator::config::{HatcheryConfig, TechnicianConfig};
use crate::sales::{self, LaborPool, SaleReceipt, SaleRejection};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Lifecycle Types
// ============================================================================

/// Where the orchestrator is in the period loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPhase {
    /// No period has started yet
    NotStarted,
    /// Roster changes allowed
    Staffing,
    /// Sales allowed; labor pool fixed
    Trading,
    /// Period billed; the next one may begin
    Closed,
    /// Terminal: cash went negative
    Bankrupt,
    /// Terminal: every configured quarter has closed
    Finished,
}

impl fmt::Display for PeriodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodPhase::NotStarted => "not started",
            PeriodPhase::Staffing => "staffing",
            PeriodPhase::Trading => "trading",
            PeriodPhase::Closed => "closed",
            PeriodPhase::Bankrupt => "bankrupt",
            PeriodPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Simulation error types
///
/// Sale rejections are wrapped here when a sale goes through the
/// orchestrator; they never change state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Cannot {operation} while the period is {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: PeriodPhase,
    },

    #[error("Vendor not found: {0}")]
    UnknownVendor(String),

    #[error(transparent)]
    Staffing(#[from] StaffingError),

    #[error(transparent)]
    SaleRejected(#[from] SaleRejection),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State validation failed: {0}")]
    StateValidationError(String),
}

impl SimulationError {
    /// The sale rejection, if this error is one
    pub fn as_rejection(&self) -> Option<&SaleRejection> {
        match self {
            SimulationError::SaleRejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Step at which cash first went negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BankruptcyStage {
    StorageBilling,
    Payroll,
    Restock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodOutcome {
    Solvent,
    Bankrupt { stage: BankruptcyStage },
}

/// Everything that happened when a period closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: u32,
    /// Units sold per product this period
    pub units_sold: BTreeMap<String, u32>,
    pub sales_revenue: i64,
    pub labor_available: f64,
    pub labor_used: f64,
    pub storage: StorageBill,
    /// Empty if the period ended at storage billing
    pub depreciation: Vec<SiteDepreciation>,
    pub payroll: Option<Payroll>,
    pub restock: Option<RestockReport>,
    pub closing_cash: i64,
    pub outcome: PeriodOutcome,
}

/// Scripted input for one whole period
#[derive(Debug, Clone, Default)]
pub struct PeriodPlan {
    pub hire: Vec<TechnicianConfig>,
    pub dismiss: Vec<String>,
    /// `(product, quantity)` in submission order
    pub sales: Vec<(String, i64)>,
    pub vendor: String,
}

/// Result of [`Orchestrator::run_period`]
#[derive(Debug, Clone)]
pub struct PeriodSummary {
    /// One entry per requested sale, in order
    pub sales: Vec<Result<SaleReceipt, SaleRejection>>,
    pub report: PeriodReport,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Owns the hatchery state and enforces the period lifecycle
pub struct Orchestrator {
    config: HatcheryConfig,

    state: HatcheryState,

    clock: PeriodClock,

    phase: PeriodPhase,

    /// Labor pool for the current trading session
    labor: LaborPool,

    /// Revenue booked since the period began (pence)
    period_revenue: i64,

    event_log: EventLog,
}

impl Orchestrator {
    /// Create new orchestrator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Successfully initialized orchestrator
    /// * `Err(SimulationError)` - Configuration validation failed
    pub fn new(config: HatcheryConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let catalog = ProductCatalog::new(
            config
                .products
                .iter()
                .map(|p| {
                    Product::new(
                        p.name.clone(),
                        p.requirements,
                        p.labor_days_per_unit,
                        p.baseline_demand,
                        p.price,
                    )
                })
                .collect(),
        );

        let sites = config
            .sites
            .iter()
            .map(|s| {
                let site = StorageSite::new(
                    s.name.clone(),
                    s.capacity,
                    s.depreciation_rate,
                    s.storage_cost_rate,
                );
                match s.opening_stock {
                    Some(stock) => site.with_stock(stock),
                    None => site,
                }
            })
            .collect();

        let vendors = config
            .vendors
            .iter()
            .map(|v| Vendor::new(v.name.clone(), v.prices))
            .collect();

        let mut state = HatcheryState::new(config.opening_cash, catalog, sites, vendors);
        for tech in &config.technicians {
            state.hire(Self::technician_from(&config, tech))?;
        }

        Ok(Self {
            clock: PeriodClock::new(config.num_quarters),
            config,
            state,
            phase: PeriodPhase::NotStarted,
            labor: LaborPool::new(0.0),
            period_revenue: 0,
            event_log: EventLog::new(),
        })
    }

    /// Validate configuration
    fn validate_config(config: &HatcheryConfig) -> Result<(), SimulationError> {
        let invalid = |msg: String| Err(SimulationError::InvalidConfig(msg));

        if config.num_quarters == 0 {
            return invalid("num_quarters must be > 0".to_string());
        }
        if !(config.days_per_technician > 0.0) {
            return invalid("days_per_technician must be > 0".to_string());
        }
        if config.opening_cash < 0 {
            return invalid(format!(
                "opening_cash ({}) must be >= 0",
                config.opening_cash
            ));
        }
        if config.storage_base_fee < 0 || config.default_weekly_rate < 0 {
            return invalid("fees and rates must be non-negative".to_string());
        }
        if let Some(tech) = config
            .technicians
            .iter()
            .find(|t| t.weekly_rate.is_some_and(|rate| rate < 0))
        {
            return invalid(format!(
                "Technician {}: weekly rate must be >= 0",
                tech.name
            ));
        }
        if config.min_technicians > config.max_technicians {
            return invalid(format!(
                "min_technicians ({}) exceeds max_technicians ({})",
                config.min_technicians, config.max_technicians
            ));
        }
        if config.technicians.len() > config.max_technicians {
            return invalid(format!(
                "{} initial technicians exceeds max_technicians ({})",
                config.technicians.len(),
                config.max_technicians
            ));
        }
        if config.sites.is_empty() {
            return invalid("Must have at least one storage site".to_string());
        }
        if config.products.is_empty() {
            return invalid("Must have at least one product".to_string());
        }
        if config.vendors.is_empty() {
            return invalid("Must have at least one vendor".to_string());
        }

        let mut names = HashSet::new();
        for site in &config.sites {
            if !names.insert(&site.name) {
                return invalid(format!("Duplicate site name: {}", site.name));
            }
            for (kind, &capacity) in site.capacity.iter() {
                if !(capacity >= 0.0) {
                    return invalid(format!("Site {}: {} capacity must be >= 0", site.name, kind));
                }
                let rate = site.depreciation_rate[kind];
                if !(0.0..=1.0).contains(&rate) {
                    return invalid(format!(
                        "Site {}: {} depreciation rate {} outside [0, 1]",
                        site.name, kind, rate
                    ));
                }
                if site.storage_cost_rate[kind] < 0 {
                    return invalid(format!(
                        "Site {}: {} storage cost must be >= 0",
                        site.name, kind
                    ));
                }
            }
        }

        let mut names = HashSet::new();
        for product in &config.products {
            if !names.insert(&product.name) {
                return invalid(format!("Duplicate product name: {}", product.name));
            }
            if product.price < 0 || !(product.labor_days_per_unit >= 0.0) {
                return invalid(format!(
                    "Product {}: price and labor time must be >= 0",
                    product.name
                ));
            }
            if product.requirements.iter().any(|(_, &r)| !(r >= 0.0)) {
                return invalid(format!(
                    "Product {}: requirements must be >= 0",
                    product.name
                ));
            }
        }

        let mut names = HashSet::new();
        for vendor in &config.vendors {
            if !names.insert(&vendor.name) {
                return invalid(format!("Duplicate vendor name: {}", vendor.name));
            }
            if vendor.prices.iter().any(|(_, &p)| p < 0) {
                return invalid(format!("Vendor {}: prices must be >= 0", vendor.name));
            }
        }

        Ok(())
    }

    fn technician_from(config: &HatcheryConfig, tech: &TechnicianConfig) -> Technician {
        let technician = Technician::new(
            tech.name.clone(),
            tech.weekly_rate.unwrap_or(config.default_weekly_rate),
        );
        match &tech.specialization {
            Some(product) => technician.with_specialization(product.clone()),
            None => technician,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &HatcheryConfig {
        &self.config
    }

    pub fn state(&self) -> &HatcheryState {
        &self.state
    }

    pub fn phase(&self) -> PeriodPhase {
        self.phase
    }

    /// Current quarter (0 before the first period)
    pub fn current_period(&self) -> u32 {
        self.clock.current_period()
    }

    pub fn clock(&self) -> &PeriodClock {
        &self.clock
    }

    /// Labor pool of the current (or last) trading session
    pub fn labor(&self) -> &LaborPool {
        &self.labor
    }

    /// Revenue booked since the current period began (pence)
    pub fn period_revenue(&self) -> i64 {
        self.period_revenue
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// True once cash has fallen below zero
    pub fn is_bankrupt(&self) -> bool {
        self.phase == PeriodPhase::Bankrupt || self.state.is_bankrupt()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == PeriodPhase::Finished
    }

    /// True once no further period can run
    pub fn is_over(&self) -> bool {
        self.is_bankrupt() || self.is_finished()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    fn require_phase(
        &self,
        operation: &'static str,
        allowed: &[PeriodPhase],
    ) -> Result<(), SimulationError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SimulationError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn log_event(&mut self, event: Event) {
        self.event_log.log(event);
    }

    /// Start the next quarter: clear the ledger and reset demand
    ///
    /// Returns the new quarter number.
    pub fn begin_period(&mut self) -> Result<u32, SimulationError> {
        self.require_phase("begin a period", &[PeriodPhase::NotStarted, PeriodPhase::Closed])?;
        let period = self.clock.advance().ok_or(SimulationError::WrongPhase {
            operation: "begin a period",
            phase: PeriodPhase::Finished,
        })?;

        self.state.reset_ledger();
        self.state.reset_demand();
        self.period_revenue = 0;
        self.labor = LaborPool::new(0.0);
        self.phase = PeriodPhase::Staffing;

        tracing::info!(period, cash = self.state.cash(), "period started");
        self.log_event(Event::PeriodStarted { period });
        Ok(period)
    }

    /// Hire at the default weekly rate
    pub fn hire(&mut self, name: &str, specialization: Option<&str>) -> Result<(), SimulationError> {
        let mut tech = TechnicianConfig::new(name);
        tech.specialization = specialization.map(str::to_string);
        self.hire_technician(&tech)
    }

    /// Hire a technician during staffing
    pub fn hire_technician(&mut self, tech: &TechnicianConfig) -> Result<(), SimulationError> {
        self.require_phase("hire technicians", &[PeriodPhase::Staffing])?;
        if self.state.roster().len() >= self.config.max_technicians {
            return Err(StaffingError::RosterFull {
                max: self.config.max_technicians,
            }
            .into());
        }

        let technician = Self::technician_from(&self.config, tech);
        let weekly_rate = technician.weekly_rate();
        self.state.hire(technician)?;

        tracing::info!(name = %tech.name, weekly_rate, specialization = ?tech.specialization, "technician hired");
        self.log_event(Event::TechnicianHired {
            period: self.current_period(),
            name: tech.name.clone(),
            weekly_rate,
            specialization: tech.specialization.clone(),
        });
        Ok(())
    }

    /// Dismiss a technician by name during staffing
    pub fn dismiss(&mut self, name: &str) -> Result<Technician, SimulationError> {
        self.require_phase("dismiss technicians", &[PeriodPhase::Staffing])?;
        if self.state.roster().len() <= self.config.min_technicians {
            return Err(StaffingError::RosterMinimum {
                min: self.config.min_technicians,
            }
            .into());
        }

        let removed = self.state.dismiss(name)?;

        tracing::info!(name, "technician dismissed");
        self.log_event(Event::TechnicianDismissed {
            period: self.current_period(),
            name: name.to_string(),
        });
        Ok(removed)
    }

    /// Close staffing and fix the period's labor pool
    pub fn open_trading(&mut self) -> Result<&LaborPool, SimulationError> {
        self.require_phase("open trading", &[PeriodPhase::Staffing])?;
        let headcount = self.state.roster().len();
        if headcount < self.config.min_technicians {
            return Err(StaffingError::RosterMinimum {
                min: self.config.min_technicians,
            }
            .into());
        }

        self.labor = LaborPool::for_state(&self.state, self.config.days_per_technician);
        self.phase = PeriodPhase::Trading;

        let labor_days = self.labor.initial();
        tracing::info!(technicians = headcount, labor_days, "trading opened");
        self.log_event(Event::TradingOpened {
            period: self.current_period(),
            technicians: headcount,
            labor_days,
        });
        Ok(&self.labor)
    }

    /// Try one sale against the current trading session
    ///
    /// A rejection is returned as [`SimulationError::SaleRejected`] and leaves
    /// all state untouched.
    pub fn attempt_sale(
        &mut self,
        product: &str,
        quantity: i64,
    ) -> Result<SaleReceipt, SimulationError> {
        self.require_phase("sell", &[PeriodPhase::Trading])?;
        let period = self.current_period();

        match sales::attempt_sale(&mut self.state, &mut self.labor, product, quantity) {
            Ok(receipt) => {
                self.period_revenue += receipt.revenue;
                self.log_event(Event::SaleCommitted {
                    period,
                    sale_id: receipt.id.clone(),
                    product: receipt.product.clone(),
                    quantity: receipt.quantity,
                    revenue: receipt.revenue,
                    labor_days: receipt.labor_days,
                });
                Ok(receipt)
            }
            Err(rejection) => {
                self.log_event(Event::SaleRejected {
                    period,
                    product: product.to_string(),
                    quantity,
                    reason: rejection.to_string(),
                });
                Err(rejection.into())
            }
        }
    }

    /// End trading and run storage billing, depreciation, payroll and restock
    ///
    /// Stops early (and permanently) if cash goes negative after billing or
    /// payroll. An unknown vendor is reported before anything is charged.
    pub fn close_period(&mut self, vendor_name: &str) -> Result<PeriodReport, SimulationError> {
        self.require_phase("close the period", &[PeriodPhase::Trading])?;
        let vendor = self
            .state
            .vendor(vendor_name)
            .cloned()
            .ok_or_else(|| SimulationError::UnknownVendor(vendor_name.to_string()))?;
        let period = self.current_period();

        let storage = bill_storage(&mut self.state, self.config.storage_base_fee);
        self.log_event(Event::StorageBilled {
            period,
            base_fee: storage.base_fee,
            stock_cost: storage.stock_cost,
            total: storage.total,
        });
        let mut report = PeriodReport {
            period,
            units_sold: self
                .state
                .ledger()
                .iter()
                .map(|(name, units)| (name.to_string(), units))
                .collect(),
            sales_revenue: self.period_revenue,
            labor_available: self.labor.initial(),
            labor_used: self.labor.used(),
            storage,
            depreciation: Vec::new(),
            payroll: None,
            restock: None,
            closing_cash: self.state.cash(),
            outcome: PeriodOutcome::Solvent,
        };
        if self.state.is_bankrupt() {
            return Ok(self.declare_bankrupt(report, BankruptcyStage::StorageBilling));
        }

        report.depreciation = depreciate_all(&mut self.state);
        for site in &report.depreciation {
            self.event_log.log(Event::ResourcesDepreciated {
                period,
                site: site.site.clone(),
                lost: site.lost,
            });
        }

        let payroll = pay_roster(&mut self.state, self.config.weeks_per_period);
        self.log_event(Event::PayrollPaid {
            period,
            technicians: payroll.payments.len(),
            total: payroll.total,
        });
        report.payroll = Some(payroll);
        report.closing_cash = self.state.cash();
        if self.state.is_bankrupt() {
            return Ok(self.declare_bankrupt(report, BankruptcyStage::Payroll));
        }

        let restocked = restock(&mut self.state, &vendor);
        for line in &restocked.lines {
            match line.outcome {
                RestockOutcome::NotNeeded => {}
                RestockOutcome::Purchased {
                    ordered,
                    delivered,
                    cost,
                } => self.event_log.log(Event::ResourcePurchased {
                    period,
                    vendor: restocked.vendor.clone(),
                    resource: line.resource,
                    ordered,
                    delivered,
                    cost,
                }),
                RestockOutcome::Unaffordable {
                    cost,
                    cash_available,
                    ..
                } => self.event_log.log(Event::PurchaseSkipped {
                    period,
                    vendor: restocked.vendor.clone(),
                    resource: line.resource,
                    cost,
                    cash_available,
                }),
            }
        }
        report.restock = Some(restocked);
        report.closing_cash = self.state.cash();
        if self.state.is_bankrupt() {
            return Ok(self.declare_bankrupt(report, BankruptcyStage::Restock));
        }

        self.phase = if self.clock.is_exhausted() {
            PeriodPhase::Finished
        } else {
            PeriodPhase::Closed
        };
        tracing::info!(period, cash = report.closing_cash, phase = %self.phase, "period closed");
        self.log_event(Event::PeriodClosed {
            period,
            cash: report.closing_cash,
        });
        Ok(report)
    }

    fn declare_bankrupt(&mut self, mut report: PeriodReport, stage: BankruptcyStage) -> PeriodReport {
        let cash = self.state.cash();
        tracing::warn!(period = report.period, cash, ?stage, "went bankrupt");
        self.phase = PeriodPhase::Bankrupt;
        self.log_event(Event::Bankrupt {
            period: report.period,
            cash,
        });
        report.closing_cash = cash;
        report.outcome = PeriodOutcome::Bankrupt { stage };
        report
    }

    /// Run one whole period from a script
    ///
    /// Staffing errors abort the period before trading opens; sale rejections
    /// are collected and do not stop the remaining sales.
    pub fn run_period(&mut self, plan: &PeriodPlan) -> Result<PeriodSummary, SimulationError> {
        self.begin_period()?;
        for name in &plan.dismiss {
            self.dismiss(name)?;
        }
        for tech in &plan.hire {
            self.hire_technician(tech)?;
        }
        self.open_trading()?;

        let mut sales = Vec::with_capacity(plan.sales.len());
        for (product, quantity) in &plan.sales {
            match self.attempt_sale(product, *quantity) {
                Ok(receipt) => sales.push(Ok(receipt)),
                Err(SimulationError::SaleRejected(rejection)) => sales.push(Err(rejection)),
                Err(other) => return Err(other),
            }
        }

        let report = self.close_period(&plan.vendor)?;
        Ok(PeriodSummary { sales, report })
    }
}
