//! Restocking from a vendor
//!
//! For each resource kind the amount to buy is computed once, as aggregate
//! capacity minus aggregate stock. If cash covers the vendor's price for that
//! amount, cash is debited and the amount is distributed across the sites in
//! priority order. Anything that does not fit is simply not delivered; the
//! cost is not refunded.

use crate::models::resource::ResourceKind;
use crate::models::state::HatcheryState;
use crate::models::vendor::Vendor;
use serde::Serialize;

/// What happened to one resource kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RestockOutcome {
    /// Pool already at capacity
    NotNeeded,

    /// Paid for `ordered`, of which `delivered` fit into the sites
    Purchased {
        ordered: f64,
        delivered: f64,
        cost: i64,
    },

    /// Cash did not cover the cost; nothing bought
    Unaffordable {
        needed: f64,
        cost: i64,
        cash_available: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockLine {
    pub resource: ResourceKind,
    pub outcome: RestockOutcome,
}

/// Result of restocking every kind from one vendor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockReport {
    pub vendor: String,
    pub lines: Vec<RestockLine>,
    /// Total cash spent
    pub total_cost: i64,
}

impl RestockReport {
    pub fn outcome(&self, resource: ResourceKind) -> Option<&RestockOutcome> {
        self.lines
            .iter()
            .find(|l| l.resource == resource)
            .map(|l| &l.outcome)
    }
}

/// Buy each kind's aggregate shortfall from `vendor` where affordable
pub fn restock(state: &mut HatcheryState, vendor: &Vendor) -> RestockReport {
    let mut lines = Vec::with_capacity(ResourceKind::ALL.len());
    let mut total_cost = 0;

    for resource in ResourceKind::ALL {
        let needed = state.shortfall(resource);
        if needed <= 0.0 {
            lines.push(RestockLine {
                resource,
                outcome: RestockOutcome::NotNeeded,
            });
            continue;
        }

        let cost = vendor.purchase_cost(resource, needed);
        let outcome = if state.cash() >= cost {
            state.debit(cost);
            total_cost += cost;
            let leftover = state.refill(resource, needed);
            let delivered = needed - leftover;
            tracing::info!(
                vendor = vendor.name(),
                %resource,
                ordered = needed,
                delivered,
                cost,
                "resource purchased"
            );
            RestockOutcome::Purchased {
                ordered: needed,
                delivered,
                cost,
            }
        } else {
            tracing::warn!(
                vendor = vendor.name(),
                %resource,
                cost,
                cash = state.cash(),
                "not enough cash to restock"
            );
            RestockOutcome::Unaffordable {
                needed,
                cost,
                cash_available: state.cash(),
            }
        };
        lines.push(RestockLine { resource, outcome });
    }

    RestockReport {
        vendor: vendor.name().to_string(),
        lines,
        total_cost,
    }
}
