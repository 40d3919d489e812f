//! Event logging for simulation replay and auditing.
//!
//! Every state change the orchestrator performs is recorded as an [`Event`].
//! The log is independent of `tracing` output: tracing is for operators,
//! the event log is structured data for reports and tests.
//!
//! # Event Types
//!
//! - **Period**: period started, trading opened, period closed
//! - **Staffing**: technician hired or dismissed
//! - **Sales**: sale committed or rejected
//! - **Billing**: storage billed, resources depreciated, payroll paid
//! - **Restock**: resources purchased or purchase skipped
//! - **Terminal**: bankruptcy
//!
//! # Example
//!
//! ```rust
//! use hatchery_simulator_core::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::PeriodStarted { period: 1 });
//! log.log(Event::SaleCommitted {
//!     period: 1,
//!     sale_id: "sale-1".to_string(),
//!     product: "Timpani".to_string(),
//!     quantity: 5,
//!     revenue: 175_000,
//!     labor_days: 5.0,
//! });
//!
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.events_of_type("SaleCommitted").len(), 1);
//! ```

use crate::models::resource::{PerResource, ResourceKind};

/// Simulation event capturing a state change.
///
/// All events carry the period (quarter) they happened in.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PeriodStarted {
        period: u32,
    },

    TechnicianHired {
        period: u32,
        name: String,
        weekly_rate: i64,
        specialization: Option<String>,
    },

    TechnicianDismissed {
        period: u32,
        name: String,
    },

    /// Labor pool fixed for the period
    TradingOpened {
        period: u32,
        technicians: usize,
        labor_days: f64,
    },

    SaleCommitted {
        period: u32,
        sale_id: String,
        product: String,
        quantity: u32,
        revenue: i64,
        labor_days: f64,
    },

    /// Sale refused; no state changed
    SaleRejected {
        period: u32,
        product: String,
        quantity: i64,
        reason: String,
    },

    StorageBilled {
        period: u32,
        base_fee: i64,
        stock_cost: i64,
        total: i64,
    },

    ResourcesDepreciated {
        period: u32,
        site: String,
        lost: PerResource<f64>,
    },

    PayrollPaid {
        period: u32,
        technicians: usize,
        total: i64,
    },

    ResourcePurchased {
        period: u32,
        vendor: String,
        resource: ResourceKind,
        ordered: f64,
        delivered: f64,
        cost: i64,
    },

    /// Restock skipped because cash did not cover the cost
    PurchaseSkipped {
        period: u32,
        vendor: String,
        resource: ResourceKind,
        cost: i64,
        cash_available: i64,
    },

    Bankrupt {
        period: u32,
        cash: i64,
    },

    PeriodClosed {
        period: u32,
        cash: i64,
    },
}

impl Event {
    /// Period the event happened in
    pub fn period(&self) -> u32 {
        match self {
            Event::PeriodStarted { period }
            | Event::TechnicianHired { period, .. }
            | Event::TechnicianDismissed { period, .. }
            | Event::TradingOpened { period, .. }
            | Event::SaleCommitted { period, .. }
            | Event::SaleRejected { period, .. }
            | Event::StorageBilled { period, .. }
            | Event::ResourcesDepreciated { period, .. }
            | Event::PayrollPaid { period, .. }
            | Event::ResourcePurchased { period, .. }
            | Event::PurchaseSkipped { period, .. }
            | Event::Bankrupt { period, .. }
            | Event::PeriodClosed { period, .. } => *period,
        }
    }

    /// Variant name, for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PeriodStarted { .. } => "PeriodStarted",
            Event::TechnicianHired { .. } => "TechnicianHired",
            Event::TechnicianDismissed { .. } => "TechnicianDismissed",
            Event::TradingOpened { .. } => "TradingOpened",
            Event::SaleCommitted { .. } => "SaleCommitted",
            Event::SaleRejected { .. } => "SaleRejected",
            Event::StorageBilled { .. } => "StorageBilled",
            Event::ResourcesDepreciated { .. } => "ResourcesDepreciated",
            Event::PayrollPaid { .. } => "PayrollPaid",
            Event::ResourcePurchased { .. } => "ResourcePurchased",
            Event::PurchaseSkipped { .. } => "PurchaseSkipped",
            Event::Bankrupt { .. } => "Bankrupt",
            Event::PeriodClosed { .. } => "PeriodClosed",
        }
    }
}

/// Append-only event log, in the order events occurred
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_in_period(&self, period: u32) -> Vec<&Event> {
        self.events.iter().filter(|e| e.period() == period).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}
