//! Orchestrator configuration
//!
//! Plain data describing a simulation run. [`HatcheryConfig::default`]
//! reproduces the standard hatchery: two warehouses, six fish species, two
//! vendors and £10,000 opening cash. Every type is serde-enabled so a run can
//! be described in JSON; missing fields fall back to the defaults.
//!
//! CRITICAL: All money values are i64 (pence)

use crate::core::money::pounds;
use crate::models::resource::PerResource;
use serde::{Deserialize, Serialize};

/// Complete simulation configuration
///
/// # Fields
///
/// * `opening_cash` - Starting balance (pence)
/// * `num_quarters` - Periods to simulate before finishing
/// * `days_per_technician` - Labor-days each technician adds to a period
/// * `weeks_per_period` - Weeks of pay per period
/// * `storage_base_fee` - Fixed rent/utilities billed each period (pence)
/// * `default_weekly_rate` - Pay for technicians hired without an explicit rate
/// * `min_technicians` / `max_technicians` - Headcount bounds while trading
/// * `sites` - Storage sites, in consumption/refill priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatcheryConfig {
    pub opening_cash: i64,
    pub num_quarters: u32,
    pub days_per_technician: f64,
    pub weeks_per_period: u32,
    pub storage_base_fee: i64,
    pub default_weekly_rate: i64,
    pub min_technicians: usize,
    pub max_technicians: usize,
    pub sites: Vec<SiteConfig>,
    pub products: Vec<ProductConfig>,
    pub vendors: Vec<VendorConfig>,
    /// Technicians on staff before the first period
    pub technicians: Vec<TechnicianConfig>,
}

impl Default for HatcheryConfig {
    fn default() -> Self {
        Self {
            opening_cash: pounds(10_000),
            num_quarters: 1,
            days_per_technician: 45.0,
            weeks_per_period: 12,
            storage_base_fee: pounds(1_500),
            default_weekly_rate: pounds(500),
            min_technicians: 1,
            max_technicians: 5,
            sites: default_sites(),
            products: default_products(),
            vendors: default_vendors(),
            technicians: Vec::new(),
        }
    }
}

/// One storage site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub capacity: PerResource<f64>,
    /// Starting stock; `None` starts full
    #[serde(default)]
    pub opening_stock: Option<PerResource<f64>>,
    /// Fraction lost per period, in [0, 1]
    pub depreciation_rate: PerResource<f64>,
    /// Pence per unit held at billing time
    pub storage_cost_rate: PerResource<i64>,
}

/// One product; fertilizer requirement in mL per unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub requirements: PerResource<f64>,
    pub labor_days_per_unit: f64,
    pub baseline_demand: u32,
    /// Pence per unit
    pub price: i64,
}

/// One vendor's price list (pence per unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorConfig {
    pub name: String,
    pub prices: PerResource<i64>,
}

/// A technician to hire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianConfig {
    pub name: String,
    /// Pence per week; `None` uses the configured default rate
    #[serde(default)]
    pub weekly_rate: Option<i64>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl TechnicianConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weekly_rate: None,
            specialization: None,
        }
    }

    pub fn with_specialization(mut self, product: impl Into<String>) -> Self {
        self.specialization = Some(product.into());
        self
    }

    pub fn with_weekly_rate(mut self, weekly_rate: i64) -> Self {
        self.weekly_rate = Some(weekly_rate);
        self
    }
}

/// Main warehouse first, auxiliary second
pub fn default_sites() -> Vec<SiteConfig> {
    let depreciation_rate = PerResource::new(0.4, 0.1, 0.0);
    // £0.10 per litre of fertilizer, £1.00 per kg of feed or salt
    let storage_cost_rate = PerResource::new(10, 100, 100);
    vec![
        SiteConfig {
            name: "main".to_string(),
            capacity: PerResource::new(20.0, 400.0, 200.0),
            opening_stock: None,
            depreciation_rate,
            storage_cost_rate,
        },
        SiteConfig {
            name: "auxiliary".to_string(),
            capacity: PerResource::new(10.0, 200.0, 100.0),
            opening_stock: None,
            depreciation_rate,
            storage_cost_rate,
        },
    ]
}

pub fn default_products() -> Vec<ProductConfig> {
    let product = |name: &str, fertilizer, feed, salt, labor_days_per_unit, baseline_demand, price| {
        ProductConfig {
            name: name.to_string(),
            requirements: PerResource::new(fertilizer, feed, salt),
            labor_days_per_unit,
            baseline_demand,
            price: pounds(price),
        }
    };
    vec![
        product("Clef Fins", 100.0, 12.0, 2.0, 2.0, 25, 250),
        product("Timpani", 50.0, 9.0, 2.0, 1.0, 10, 350),
        product("Andalusian Brim", 90.0, 6.0, 2.0, 0.5, 15, 250),
        product("Plagal Cod", 100.0, 10.0, 2.0, 2.0, 20, 400),
        product("Fugue Flounder", 200.0, 12.0, 2.0, 2.5, 30, 550),
        product("Modal Bass", 300.0, 12.0, 6.0, 3.0, 50, 500),
    ]
}

pub fn default_vendors() -> Vec<VendorConfig> {
    vec![
        VendorConfig {
            name: "Slippery Lakes".to_string(),
            prices: PerResource::new(30, 10, 5),
        },
        VendorConfig {
            name: "Scaly Wholesaler".to_string(),
            prices: PerResource::new(20, 40, 25),
        },
    ]
}
