//! State digests and consistency checks
//!
//! A digest is the SHA-256 of the canonical JSON form of a value (object
//! keys sorted recursively). Two states with equal digests are identical in
//! every serialized field, which is how tests confirm a rejected sale changed
//! nothing.

use crate::models::resource::ResourceKind;
use crate::models::state::HatcheryState;
use crate::orchestrator::engine::SimulationError;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// SHA-256 hex digest of any serializable value
///
/// # Example
/// ```
/// use hatchery_simulator_core::orchestrator::{digest_of, HatcheryConfig};
///
/// let a = digest_of(&HatcheryConfig::default()).unwrap();
/// let b = digest_of(&HatcheryConfig::default()).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn digest_of<T: Serialize>(value: &T) -> Result<String, SimulationError> {
    let value = serde_json::to_value(value)
        .map_err(|e| SimulationError::SerializationError(format!("Digest failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| SimulationError::SerializationError(format!("Digest failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest of the full hatchery state
pub fn state_digest(state: &HatcheryState) -> Result<String, SimulationError> {
    digest_of(state)
}

/// Check the invariants every state must hold between operations
///
/// - every site's stock lies within `[0, capacity]` for every kind
/// - demand never exceeds a product's baseline
pub fn validate_state(state: &HatcheryState) -> Result<(), SimulationError> {
    for site in state.sites() {
        for kind in ResourceKind::ALL {
            let stock = site.stock(kind);
            let capacity = site.capacity(kind);
            if !(0.0..=capacity).contains(&stock) {
                return Err(SimulationError::StateValidationError(format!(
                    "Site {}: {} stock {} outside [0, {}]",
                    site.name(),
                    kind,
                    stock,
                    capacity
                )));
            }
        }
    }

    for product in state.catalog().iter() {
        if product.demand() > product.baseline_demand() {
            return Err(SimulationError::StateValidationError(format!(
                "Product {}: demand {} exceeds baseline {}",
                product.name(),
                product.demand(),
                product.baseline_demand()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Product, ProductCatalog};
    use crate::models::resource::PerResource;
    use crate::models::site::StorageSite;

    fn state(cash: i64) -> HatcheryState {
        let catalog = ProductCatalog::new(vec![Product::new(
            "Timpani",
            PerResource::new(50.0, 9.0, 2.0),
            1.0,
            10,
            35_000,
        )]);
        let site = StorageSite::new(
            "main",
            PerResource::new(20.0, 400.0, 200.0),
            PerResource::splat(0.0),
            PerResource::splat(0),
        );
        HatcheryState::new(cash, catalog, vec![site], vec![])
    }

    #[test]
    fn test_digest_changes_with_cash() {
        let a = state_digest(&state(0)).unwrap();
        let b = state_digest(&state(1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, state_digest(&state(0)).unwrap());
    }

    #[test]
    fn test_fresh_state_is_valid() {
        assert!(validate_state(&state(0)).is_ok());
    }
}
