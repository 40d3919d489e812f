//! Product catalog
//!
//! Each product (fish species) has per-unit resource requirements, a labor
//! time per unit, a unit price and a demand ceiling that resets to a fixed
//! baseline at the start of every period.
//!
//! Fertilizer requirements are stored in millilitres per unit while stock is
//! held in litres; [`Product::requirement_for`] applies the conversion.
//!
//! CRITICAL: All money values are i64 (pence)

use crate::models::resource::{PerResource, ResourceKind};
use serde::{Deserialize, Serialize};

/// Catalog fertilizer units (mL) per stocked fertilizer unit (L)
pub const FERTILIZER_UNITS_PER_LITRE: f64 = 1000.0;

/// A sellable product
///
/// # Example
/// ```
/// use hatchery_simulator_core::{PerResource, Product, ResourceKind};
///
/// let timpani = Product::new("Timpani", PerResource::new(50.0, 9.0, 2.0), 1.0, 10, 35_000);
/// assert_eq!(timpani.demand(), 10);
/// assert_eq!(timpani.requirement_for(ResourceKind::Fertilizer, 4), 0.2);
/// assert_eq!(timpani.requirement_for(ResourceKind::Feed, 4), 36.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product name
    name: String,

    /// Resources consumed per unit sold (fertilizer in mL)
    requirements: PerResource<f64>,

    /// Technician days needed per unit sold
    labor_days_per_unit: f64,

    /// Units that can still be sold this period
    demand: u32,

    /// Demand restored at the start of each period
    baseline_demand: u32,

    /// Price per unit (pence)
    price: i64,
}

impl Product {
    /// Create a product with demand at its baseline
    pub fn new(
        name: impl Into<String>,
        requirements: PerResource<f64>,
        labor_days_per_unit: f64,
        baseline_demand: u32,
        price: i64,
    ) -> Self {
        Self {
            name: name.into(),
            requirements,
            labor_days_per_unit,
            demand: baseline_demand,
            baseline_demand,
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-unit requirements as stored in the catalog (fertilizer in mL)
    pub fn requirements(&self) -> &PerResource<f64> {
        &self.requirements
    }

    pub fn labor_days_per_unit(&self) -> f64 {
        self.labor_days_per_unit
    }

    pub fn demand(&self) -> u32 {
        self.demand
    }

    pub fn baseline_demand(&self) -> u32 {
        self.baseline_demand
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Stock of `kind` consumed by selling `quantity` units
    pub fn requirement_for(&self, kind: ResourceKind, quantity: u32) -> f64 {
        let raw = self.requirements[kind] * quantity as f64;
        match kind {
            ResourceKind::Fertilizer => raw / FERTILIZER_UNITS_PER_LITRE,
            ResourceKind::Feed | ResourceKind::Salt => raw,
        }
    }

    /// Restore demand to the baseline
    pub fn reset_demand(&mut self) {
        self.demand = self.baseline_demand;
    }

    /// Reduce demand after a sale, never below zero
    pub(crate) fn consume_demand(&mut self, quantity: u32) {
        self.demand = self.demand.saturating_sub(quantity);
    }
}

/// Ordered collection of products, keyed by name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog, keeping the given order
    ///
    /// # Panics
    /// Panics if two products share a name
    pub fn new(products: Vec<Product>) -> Self {
        for (i, product) in products.iter().enumerate() {
            assert!(
                !products[..i].iter().any(|p| p.name == product.name),
                "Product {} already exists",
                product.name
            );
        }
        Self { products }
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Products in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn price(&self, name: &str) -> Option<i64> {
        self.get(name).map(Product::price)
    }

    pub fn demand(&self, name: &str) -> Option<u32> {
        self.get(name).map(Product::demand)
    }

    pub fn labor_days_per_unit(&self, name: &str) -> Option<f64> {
        self.get(name).map(Product::labor_days_per_unit)
    }

    pub fn requirements(&self, name: &str) -> Option<&PerResource<f64>> {
        self.get(name).map(Product::requirements)
    }

    /// Restore every product's demand to its baseline
    pub fn reset_demand(&mut self) {
        for product in &mut self.products {
            product.reset_demand();
        }
    }
}
