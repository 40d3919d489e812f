//! Money helpers
//!
//! CRITICAL: All money values are i64 minor units (pence). Resource
//! quantities are f64, so any rate applied to a quantity is rounded to the
//! nearest minor unit at the point the charge is computed.

/// Minor units per whole currency unit
pub const MINOR_UNITS: i64 = 100;

/// Convert a whole-pound figure to minor units
///
/// # Example
/// ```
/// use hatchery_simulator_core::core::money::pounds;
///
/// assert_eq!(pounds(350), 35_000);
/// ```
pub const fn pounds(amount: i64) -> i64 {
    amount * MINOR_UNITS
}

/// Charge `rate` minor units per unit for a fractional `quantity`
///
/// Rounds half away from zero.
///
/// # Example
/// ```
/// use hatchery_simulator_core::core::money::charge_for;
///
/// // 12.5 units at 10p each
/// assert_eq!(charge_for(10, 12.5), 125);
/// // 0.05 units at 30p each = 1.5p, rounds to 2p
/// assert_eq!(charge_for(30, 0.05), 2);
/// ```
pub fn charge_for(rate: i64, quantity: f64) -> i64 {
    (rate as f64 * quantity).round() as i64
}
