//! Integration tests for the Orchestrator period loop
//!
//! These tests drive complete quarters: staffing, trading and period close,
//! and check that state carries (or resets) correctly between quarters.

use hatchery_simulator_core::orchestrator::{
    validate_state, HatcheryConfig, Orchestrator, PeriodOutcome, PeriodPhase, PeriodPlan,
    SimulationError, TechnicianConfig,
};
use hatchery_simulator_core::{pounds, Event, ResourceKind, SaleRejection, StaffingError};

/// Default hatchery with £50,000 and two technicians
fn create_config(num_quarters: u32) -> HatcheryConfig {
    HatcheryConfig {
        num_quarters,
        opening_cash: pounds(50_000),
        technicians: vec![
            TechnicianConfig::new("Ada"),
            TechnicianConfig::new("Brian").with_specialization("Timpani"),
        ],
        ..HatcheryConfig::default()
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_initial_state() {
    let orchestrator = Orchestrator::new(create_config(2)).unwrap();

    assert_eq!(orchestrator.phase(), PeriodPhase::NotStarted);
    assert_eq!(orchestrator.current_period(), 0);
    assert_eq!(orchestrator.state().cash(), 5_000_000);
    assert_eq!(orchestrator.state().roster().len(), 2);
    assert_eq!(orchestrator.state().sites().len(), 2);
    assert_eq!(orchestrator.state().catalog().len(), 6);
    assert!(orchestrator.event_log().is_empty());
}

#[test]
fn test_initial_technician_with_unknown_specialization_fails() {
    let mut config = create_config(1);
    config.technicians[1].specialization = Some("Goldfish".to_string());

    let err = Orchestrator::new(config).err().unwrap();
    assert_eq!(
        err,
        SimulationError::Staffing(StaffingError::UnknownSpecialization(
            "Goldfish".to_string()
        ))
    );
}

#[test]
fn test_too_many_initial_technicians_fails() {
    let mut config = create_config(1);
    config.max_technicians = 1;
    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "num_quarters": 2,
        "technicians": [
            { "name": "Ada" },
            { "name": "Brian", "specialization": "Modal Bass", "weekly_rate": 60000 }
        ]
    }"#;
    let config: HatcheryConfig = serde_json::from_str(json).unwrap();
    let orchestrator = Orchestrator::new(config).unwrap();

    let brian = orchestrator.state().roster().get("Brian").unwrap();
    assert_eq!(brian.weekly_rate(), 60_000);
    assert_eq!(brian.specialization(), Some("Modal Bass"));
    assert_eq!(orchestrator.clock().total_periods(), 2);
}

// ============================================================================
// Staffing
// ============================================================================

#[test]
fn test_hire_and_dismiss_during_staffing() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();

    orchestrator.hire("Cleo", Some("Modal Bass")).unwrap();
    let removed = orchestrator.dismiss("Ada").unwrap();

    assert_eq!(removed.name(), "Ada");
    let roster = orchestrator.state().roster();
    assert_eq!(roster.len(), 2);
    assert!(roster.contains("Cleo"));
    assert!(!roster.contains("Ada"));
}

#[test]
fn test_staffing_errors() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();

    assert_eq!(
        orchestrator.hire("Brian", None).unwrap_err(),
        SimulationError::Staffing(StaffingError::DuplicateName("Brian".to_string()))
    );
    assert_eq!(
        orchestrator.hire("  ", None).unwrap_err(),
        SimulationError::Staffing(StaffingError::EmptyName)
    );
    assert_eq!(
        orchestrator.hire("Cleo", Some("Goldfish")).unwrap_err(),
        SimulationError::Staffing(StaffingError::UnknownSpecialization(
            "Goldfish".to_string()
        ))
    );
    assert_eq!(
        orchestrator.dismiss("Zed").unwrap_err(),
        SimulationError::Staffing(StaffingError::NotFound("Zed".to_string()))
    );
    assert_eq!(orchestrator.state().roster().len(), 2);
}

#[test]
fn test_headcount_bounds() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();

    for name in ["Cleo", "Dev", "Eve"] {
        orchestrator.hire(name, None).unwrap();
    }
    assert_eq!(
        orchestrator.hire("Finn", None).unwrap_err(),
        SimulationError::Staffing(StaffingError::RosterFull { max: 5 })
    );

    for name in ["Ada", "Brian", "Cleo", "Dev"] {
        orchestrator.dismiss(name).unwrap();
    }
    assert_eq!(
        orchestrator.dismiss("Eve").unwrap_err(),
        SimulationError::Staffing(StaffingError::RosterMinimum { min: 1 })
    );
}

#[test]
fn test_cannot_open_trading_without_staff() {
    let mut orchestrator = Orchestrator::new(HatcheryConfig::default()).unwrap();
    orchestrator.begin_period().unwrap();

    assert_eq!(
        orchestrator.open_trading().unwrap_err(),
        SimulationError::Staffing(StaffingError::RosterMinimum { min: 1 })
    );
    assert_eq!(orchestrator.phase(), PeriodPhase::Staffing);
}

#[test]
fn test_no_staffing_changes_while_trading() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();

    let err = orchestrator.hire("Cleo", None).unwrap_err();
    assert_eq!(
        err,
        SimulationError::WrongPhase {
            operation: "hire technicians",
            phase: PeriodPhase::Trading
        }
    );
    assert!(orchestrator.dismiss("Ada").is_err());
}

// ============================================================================
// Trading
// ============================================================================

#[test]
fn test_labor_pool_is_headcount_times_days() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.hire("Cleo", None).unwrap();

    let labor = orchestrator.open_trading().unwrap();
    assert_eq!(labor.initial(), 135.0);
    assert_eq!(labor.remaining(), 135.0);
}

#[test]
fn test_sales_accumulate_within_period() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();

    orchestrator.attempt_sale("Timpani", 6).unwrap();
    orchestrator.attempt_sale("Clef Fins", 10).unwrap();
    let err = orchestrator.attempt_sale("Timpani", 5).unwrap_err();

    assert!(matches!(
        err.as_rejection(),
        Some(SaleRejection::InsufficientDemand { available: 4, .. })
    ));
    assert_eq!(orchestrator.period_revenue(), 6 * 35_000 + 10 * 25_000);
    // Timpani specialist: 6 x 1 x 2/3 = 4 days; Clef Fins: 10 x 2 = 20 days
    assert_eq!(orchestrator.labor().used(), 24.0);
    assert_eq!(orchestrator.event_log().events_of_type("SaleCommitted").len(), 2);
    assert_eq!(orchestrator.event_log().events_of_type("SaleRejected").len(), 1);
}

#[test]
fn test_rejected_sale_event_carries_reason() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();

    let _ = orchestrator.attempt_sale("Goldfish", 1);

    let events = orchestrator.event_log().events_of_type("SaleRejected");
    match events[0] {
        Event::SaleRejected {
            product, reason, ..
        } => {
            assert_eq!(product, "Goldfish");
            assert_eq!(reason, "Unknown product 'Goldfish'");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// ============================================================================
// Multiple Quarters
// ============================================================================

#[test]
fn test_demand_and_ledger_reset_each_quarter() {
    let mut orchestrator = Orchestrator::new(create_config(2)).unwrap();

    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();
    orchestrator.attempt_sale("Timpani", 10).unwrap();
    let first = orchestrator.close_period("Scaly Wholesaler").unwrap();
    assert_eq!(first.units_sold.get("Timpani"), Some(&10));
    assert_eq!(orchestrator.phase(), PeriodPhase::Closed);

    assert_eq!(orchestrator.begin_period().unwrap(), 2);
    assert_eq!(orchestrator.state().catalog().demand("Timpani"), Some(10));
    assert!(orchestrator.state().ledger().is_empty());
    assert_eq!(orchestrator.period_revenue(), 0);
}

#[test]
fn test_restock_refills_pool_between_quarters() {
    let mut orchestrator = Orchestrator::new(create_config(2)).unwrap();

    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();
    orchestrator.attempt_sale("Clef Fins", 20).unwrap();
    let report = orchestrator.close_period("Slippery Lakes").unwrap();

    assert_eq!(report.outcome, PeriodOutcome::Solvent);
    assert!(report.restock.is_some());
    for kind in ResourceKind::ALL {
        assert_eq!(orchestrator.state().shortfall(kind), 0.0);
    }
    assert!(validate_state(orchestrator.state()).is_ok());
}

#[test]
fn test_finishes_after_last_quarter() {
    let mut orchestrator = Orchestrator::new(create_config(2)).unwrap();
    let plan = PeriodPlan {
        sales: vec![("Modal Bass".to_string(), 10)],
        vendor: "Scaly Wholesaler".to_string(),
        ..PeriodPlan::default()
    };

    let first = orchestrator.run_period(&plan).unwrap();
    assert!(first.sales[0].is_ok());
    assert_eq!(orchestrator.phase(), PeriodPhase::Closed);

    let second = orchestrator.run_period(&plan).unwrap();
    assert_eq!(second.report.period, 2);
    assert!(orchestrator.is_finished());

    assert!(orchestrator.run_period(&plan).is_err());
    assert_eq!(orchestrator.event_log().events_of_type("PeriodClosed").len(), 2);
}

#[test]
fn test_run_period_collects_rejections() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    let plan = PeriodPlan {
        hire: vec![TechnicianConfig::new("Cleo").with_specialization("Fugue Flounder")],
        dismiss: vec!["Ada".to_string()],
        sales: vec![
            ("Fugue Flounder".to_string(), 31),
            ("Fugue Flounder".to_string(), 30),
            ("Timpani".to_string(), -1),
        ],
        vendor: "Slippery Lakes".to_string(),
    };

    let summary = orchestrator.run_period(&plan).unwrap();

    assert!(matches!(
        summary.sales[0],
        Err(SaleRejection::InsufficientDemand { .. })
    ));
    let receipt = summary.sales[1].as_ref().unwrap();
    assert!(receipt.specialist_bonus);
    assert_eq!(receipt.labor_days, 2.5 * (2.0 / 3.0) * 30.0);
    assert!(matches!(
        summary.sales[2],
        Err(SaleRejection::InvalidQuantity { quantity: -1 })
    ));
    assert_eq!(summary.report.units_sold.get("Fugue Flounder"), Some(&30));
}

#[test]
fn test_event_sequence_for_one_quarter() {
    let mut orchestrator = Orchestrator::new(create_config(1)).unwrap();
    orchestrator.begin_period().unwrap();
    orchestrator.open_trading().unwrap();
    orchestrator.attempt_sale("Timpani", 1).unwrap();
    orchestrator.close_period("Slippery Lakes").unwrap();

    let types: Vec<&str> = orchestrator
        .event_log()
        .events()
        .iter()
        .map(|e| e.event_type())
        .filter(|t| !matches!(*t, "ResourcesDepreciated" | "ResourcePurchased"))
        .collect();
    assert_eq!(
        types,
        vec![
            "PeriodStarted",
            "TradingOpened",
            "SaleCommitted",
            "StorageBilled",
            "PayrollPaid",
            "PeriodClosed",
        ]
    );
    assert!(orchestrator
        .event_log()
        .events()
        .iter()
        .all(|e| e.period() == 1));
}
