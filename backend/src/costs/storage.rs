//! Storage billing and depreciation

use crate::models::resource::PerResource;
use crate::models::state::HatcheryState;
use serde::Serialize;

/// Holding cost for one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStorageCost {
    pub site: String,
    /// Stock held when billed
    pub stock: PerResource<f64>,
    /// Charge per kind (pence)
    pub cost: PerResource<i64>,
    pub total: i64,
}

/// Breakdown of one period's storage bill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageBill {
    /// Fixed rent and utilities
    pub base_fee: i64,
    pub sites: Vec<SiteStorageCost>,
    /// Sum of per-site holding costs
    pub stock_cost: i64,
    /// `base_fee + stock_cost`, deducted from cash
    pub total: i64,
}

/// Charge the base fee plus holding cost of all remaining stock
///
/// Deducts the total from cash even if that makes the balance negative.
pub fn bill_storage(state: &mut HatcheryState, base_fee: i64) -> StorageBill {
    let sites: Vec<SiteStorageCost> = state
        .sites()
        .iter()
        .map(|site| {
            let cost = site.storage_costs();
            SiteStorageCost {
                site: site.name().to_string(),
                stock: *site.stocks(),
                cost,
                total: cost.total(),
            }
        })
        .collect();

    let stock_cost: i64 = sites.iter().map(|s| s.total).sum();
    let total = base_fee + stock_cost;
    state.debit(total);

    tracing::info!(base_fee, stock_cost, total, cash = state.cash(), "storage billed");

    StorageBill {
        base_fee,
        sites,
        stock_cost,
        total,
    }
}

/// Stock lost at one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDepreciation {
    pub site: String,
    pub lost: PerResource<f64>,
    /// Stock left after depreciation
    pub remaining: PerResource<f64>,
}

/// Apply one period of depreciation at every site, in priority order
pub fn depreciate_all(state: &mut HatcheryState) -> Vec<SiteDepreciation> {
    state
        .sites_mut()
        .iter_mut()
        .map(|site| {
            let lost = site.depreciate();
            tracing::debug!(site = site.name(), ?lost, "site depreciated");
            SiteDepreciation {
                site: site.name().to_string(),
                lost,
                remaining: *site.stocks(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductCatalog;
    use crate::models::resource::ResourceKind;
    use crate::models::site::StorageSite;

    #[test]
    fn test_bill_with_no_sites_is_base_fee() {
        let mut state = HatcheryState::new(10_000, ProductCatalog::default(), vec![], vec![]);
        let bill = bill_storage(&mut state, 150_000);
        assert_eq!(bill.total, 150_000);
        assert_eq!(state.cash(), -140_000);
    }

    #[test]
    fn test_depreciation_reports_remaining() {
        let site = StorageSite::new(
            "main",
            PerResource::new(20.0, 400.0, 200.0),
            PerResource::new(0.4, 0.1, 0.0),
            PerResource::splat(0),
        );
        let mut state = HatcheryState::new(0, ProductCatalog::default(), vec![site], vec![]);

        let report = depreciate_all(&mut state);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].remaining[ResourceKind::Fertilizer], 12.0);
        assert_eq!(report[0].lost[ResourceKind::Feed], 40.0);
    }
}
