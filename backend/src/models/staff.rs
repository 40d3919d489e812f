//! Technician roster
//!
//! Technicians provide labor-days during a trading period and are paid a
//! weekly rate. A technician may specialize in one product, which speeds up
//! work on that product for the whole team.
//!
//! CRITICAL: All money values are i64 (pence)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by roster changes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StaffingError {
    #[error("Technician name must not be empty")]
    EmptyName,

    #[error("Technician with the name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid speciality '{0}': not a product in the catalog")]
    UnknownSpecialization(String),

    #[error("No technician found with the name '{0}'")]
    NotFound(String),

    #[error("Cannot have more than {max} technicians")]
    RosterFull { max: usize },

    #[error("Cannot have less than {min} technician(s)")]
    RosterMinimum { min: usize },

    #[error("Technician '{name}' has a negative weekly rate ({rate})")]
    NegativeRate { name: String, rate: i64 },
}

/// A member of staff
///
/// # Example
/// ```
/// use hatchery_simulator_core::Technician;
///
/// let tech = Technician::new("Ada", 50_000).with_specialization("Timpani");
/// assert_eq!(tech.specialization(), Some("Timpani"));
/// assert!(tech.specializes_in("Timpani"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    name: String,

    /// Weekly pay (pence)
    weekly_rate: i64,

    /// Product this technician is faster at, if any
    specialization: Option<String>,
}

impl Technician {
    pub fn new(name: impl Into<String>, weekly_rate: i64) -> Self {
        Self {
            name: name.into(),
            weekly_rate,
            specialization: None,
        }
    }

    pub fn with_specialization(mut self, product: impl Into<String>) -> Self {
        self.specialization = Some(product.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weekly_rate(&self) -> i64 {
        self.weekly_rate
    }

    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }

    pub fn specializes_in(&self, product: &str) -> bool {
        self.specialization.as_deref() == Some(product)
    }
}

/// The hatchery's technicians, in hiring order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    technicians: Vec<Technician>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.technicians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technicians.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Technician> {
        self.technicians.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Technician> {
        self.technicians.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a technician with a unique, non-blank name and a non-negative rate
    ///
    /// Specialization is not checked here; the catalog owner validates it.
    pub fn hire(&mut self, technician: Technician) -> Result<(), StaffingError> {
        if technician.name.trim().is_empty() {
            return Err(StaffingError::EmptyName);
        }
        if self.contains(&technician.name) {
            return Err(StaffingError::DuplicateName(technician.name));
        }
        if technician.weekly_rate < 0 {
            return Err(StaffingError::NegativeRate {
                rate: technician.weekly_rate,
                name: technician.name,
            });
        }
        self.technicians.push(technician);
        Ok(())
    }

    /// Remove a technician by name
    pub fn dismiss(&mut self, name: &str) -> Result<Technician, StaffingError> {
        let index = self
            .technicians
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| StaffingError::NotFound(name.to_string()))?;
        Ok(self.technicians.remove(index))
    }

    /// Labor-days available for one period
    pub fn labor_days(&self, days_per_technician: f64) -> f64 {
        self.technicians.len() as f64 * days_per_technician
    }

    /// True if at least one technician specializes in `product`
    pub fn has_specialist(&self, product: &str) -> bool {
        self.technicians.iter().any(|t| t.specializes_in(product))
    }

    /// Sum of weekly rates (pence)
    pub fn weekly_payroll(&self) -> i64 {
        self.technicians.iter().map(|t| t.weekly_rate).sum()
    }
}
