//! Period-end billing tests
//!
//! Storage bill, depreciation, payroll and restock, both as standalone cost
//! operations and through `Orchestrator::close_period`.

use hatchery_simulator_core::costs::{RestockOutcome, SiteDepreciation};
use hatchery_simulator_core::orchestrator::{
    BankruptcyStage, HatcheryConfig, Orchestrator, PeriodOutcome, PeriodPhase, SimulationError,
    TechnicianConfig,
};
use hatchery_simulator_core::{
    bill_storage, depreciate_all, pay_roster, restock, HatcheryState, PerResource, ProductCatalog,
    ResourceKind, StorageSite, Technician, Vendor,
};

fn default_sites() -> Vec<StorageSite> {
    HatcheryConfig::default()
        .sites
        .iter()
        .map(|s| {
            StorageSite::new(
                s.name.clone(),
                s.capacity,
                s.depreciation_rate,
                s.storage_cost_rate,
            )
        })
        .collect()
}

fn full_state(cash: i64) -> HatcheryState {
    HatcheryState::new(cash, ProductCatalog::new(vec![]), default_sites(), vec![])
}

fn slippery_lakes() -> Vendor {
    Vendor::new("Slippery Lakes", PerResource::new(30, 10, 5))
}

// ============================================================================
// Storage
// ============================================================================

#[test]
fn test_storage_bill_for_full_sites() {
    let mut state = full_state(1_000_000);
    let bill = bill_storage(&mut state, 150_000);

    // main: 200 + 40_000 + 20_000, auxiliary: 100 + 20_000 + 10_000
    assert_eq!(bill.stock_cost, 90_300);
    assert_eq!(bill.total, 240_300);
    assert_eq!(bill.sites.len(), 2);
    assert_eq!(bill.sites[1].total, 30_100);
    assert_eq!(state.cash(), 1_000_000 - 240_300);
}

#[test]
fn test_storage_bill_may_drive_cash_negative() {
    let mut state = full_state(0);
    bill_storage(&mut state, 150_000);
    assert!(state.is_bankrupt());
}

#[test]
fn test_depreciation_for_full_sites() {
    let mut state = full_state(0);
    let report: Vec<SiteDepreciation> = depreciate_all(&mut state);

    assert_eq!(report[0].site, "main");
    assert_eq!(report[0].lost, PerResource::new(8.0, 40.0, 0.0));
    assert_eq!(report[1].lost, PerResource::new(4.0, 20.0, 0.0));
    assert_eq!(state.available(ResourceKind::Fertilizer), 18.0);
    assert_eq!(state.available(ResourceKind::Feed), 540.0);
    assert_eq!(state.available(ResourceKind::Salt), 300.0);
}

// ============================================================================
// Payroll
// ============================================================================

#[test]
fn test_payroll_pays_every_technician() {
    let mut state = full_state(2_000_000);
    state.hire(Technician::new("Ada", 50_000)).unwrap();
    state.hire(Technician::new("Brian", 40_000)).unwrap();

    let payroll = pay_roster(&mut state, 12);

    assert_eq!(payroll.payments.len(), 2);
    assert_eq!(payroll.payments[1].amount, 480_000);
    assert_eq!(payroll.total, 1_080_000);
    assert_eq!(state.cash(), 920_000);
}

// ============================================================================
// Restock
// ============================================================================

#[test]
fn test_restock_buys_aggregate_shortfall() {
    let mut state = full_state(100_000);
    depreciate_all(&mut state);

    let report = restock(&mut state, &slippery_lakes());

    // 12 L fertilizer at 30p, 60 kg feed at 10p
    assert_eq!(
        report.outcome(ResourceKind::Fertilizer),
        Some(&RestockOutcome::Purchased {
            ordered: 12.0,
            delivered: 12.0,
            cost: 360
        })
    );
    assert_eq!(
        report.outcome(ResourceKind::Feed),
        Some(&RestockOutcome::Purchased {
            ordered: 60.0,
            delivered: 60.0,
            cost: 600
        })
    );
    assert_eq!(
        report.outcome(ResourceKind::Salt),
        Some(&RestockOutcome::NotNeeded)
    );
    assert_eq!(report.total_cost, 960);
    assert_eq!(state.cash(), 100_000 - 960);
    for kind in ResourceKind::ALL {
        assert_eq!(state.shortfall(kind), 0.0);
    }
}

#[test]
fn test_unaffordable_restock_is_skipped() {
    let mut state = full_state(500);
    depreciate_all(&mut state);

    let report = restock(&mut state, &slippery_lakes());

    // Fertilizer (360p) fits in 500p; feed (600p) then does not
    assert!(matches!(
        report.outcome(ResourceKind::Fertilizer),
        Some(RestockOutcome::Purchased { cost: 360, .. })
    ));
    assert_eq!(
        report.outcome(ResourceKind::Feed),
        Some(&RestockOutcome::Unaffordable {
            needed: 60.0,
            cost: 600,
            cash_available: 140
        })
    );
    assert_eq!(state.cash(), 140);
    assert_eq!(state.available(ResourceKind::Feed), 540.0);
}

// ============================================================================
// Through the Orchestrator
// ============================================================================

/// No holding costs, so only the base fee and payroll move cash
fn lean_config(opening_cash: i64, base_fee: i64) -> HatcheryConfig {
    let mut config = HatcheryConfig {
        opening_cash,
        storage_base_fee: base_fee,
        weeks_per_period: 11,
        technicians: vec![TechnicianConfig::new("Ada").with_weekly_rate(1_000)],
        ..HatcheryConfig::default()
    };
    for site in &mut config.sites {
        site.storage_cost_rate = PerResource::splat(0);
    }
    config
}

fn trade_and_close(orchestrator: &mut Orchestrator) -> hatchery_simulator_core::PeriodReport {
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();
    orchestrator.close_period("Slippery Lakes").unwrap()
}

#[test]
fn test_bankrupt_after_payroll() {
    // 10_000 - 4_000 billing - 11 x 1_000 payroll = -5_000
    let mut orchestrator = Orchestrator::new(lean_config(10_000, 4_000)).unwrap();
    let report = trade_and_close(&mut orchestrator);

    assert_eq!(
        report.outcome,
        PeriodOutcome::Bankrupt {
            stage: BankruptcyStage::Payroll
        }
    );
    assert_eq!(report.closing_cash, -5_000);
    assert_eq!(report.payroll.as_ref().map(|p| p.total), Some(11_000));
    assert!(report.restock.is_none());
    assert!(!report.depreciation.is_empty());
    assert_eq!(orchestrator.phase(), PeriodPhase::Bankrupt);
    assert!(orchestrator.is_over());
}

#[test]
fn test_bankrupt_at_storage_billing_skips_the_rest() {
    let mut orchestrator = Orchestrator::new(lean_config(10_000, 12_000)).unwrap();
    let stock_before = orchestrator.state().available(ResourceKind::Fertilizer);

    let report = trade_and_close(&mut orchestrator);

    assert_eq!(
        report.outcome,
        PeriodOutcome::Bankrupt {
            stage: BankruptcyStage::StorageBilling
        }
    );
    assert_eq!(report.closing_cash, -2_000);
    assert!(report.depreciation.is_empty());
    assert!(report.payroll.is_none());
    assert_eq!(
        orchestrator.state().available(ResourceKind::Fertilizer),
        stock_before
    );
    assert_eq!(orchestrator.event_log().events_of_type("Bankrupt").len(), 1);
}

#[test]
fn test_exactly_zero_cash_is_solvent() {
    // 15_000 - 4_000 - 11_000 = 0; restock then finds nothing affordable
    let mut orchestrator = Orchestrator::new(lean_config(15_000, 4_000)).unwrap();
    let report = trade_and_close(&mut orchestrator);

    assert_eq!(report.outcome, PeriodOutcome::Solvent);
    assert_eq!(report.closing_cash, 0);
    assert_eq!(orchestrator.phase(), PeriodPhase::Finished);
}

#[test]
fn test_nothing_runs_after_bankruptcy() {
    let mut config = lean_config(10_000, 4_000);
    config.num_quarters = 3;
    let mut orchestrator = Orchestrator::new(config).unwrap();
    trade_and_close(&mut orchestrator);

    let err = orchestrator.begin_period().unwrap_err();
    assert_eq!(
        err,
        SimulationError::WrongPhase {
            operation: "begin a period",
            phase: PeriodPhase::Bankrupt
        }
    );
    assert_eq!(orchestrator.current_period(), 1);
}

#[test]
fn test_unknown_vendor_charges_nothing() {
    let mut orchestrator = Orchestrator::new(lean_config(10_000, 4_000)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();

    let err = orchestrator.close_period("Fishy Joe").unwrap_err();
    assert_eq!(err, SimulationError::UnknownVendor("Fishy Joe".to_string()));
    assert_eq!(orchestrator.state().cash(), 10_000);
    assert_eq!(orchestrator.phase(), PeriodPhase::Trading);
}
