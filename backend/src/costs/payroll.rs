//! Technician payroll

use crate::models::state::HatcheryState;
use serde::Serialize;

/// One technician's pay for the period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianPayment {
    pub name: String,
    pub weekly_rate: i64,
    pub amount: i64,
}

/// Payroll for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payroll {
    pub weeks: u32,
    pub payments: Vec<TechnicianPayment>,
    pub total: i64,
}

/// Pay every technician `weekly_rate * weeks` and deduct the total from cash
///
/// Amounts saturate at `i64::MAX` rather than overflowing.
pub fn pay_roster(state: &mut HatcheryState, weeks: u32) -> Payroll {
    let payments: Vec<TechnicianPayment> = state
        .roster()
        .iter()
        .map(|tech| TechnicianPayment {
            name: tech.name().to_string(),
            weekly_rate: tech.weekly_rate(),
            amount: tech.weekly_rate().saturating_mul(weeks as i64),
        })
        .collect();

    let total = payments
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.amount));
    state.debit(total);

    tracing::info!(technicians = payments.len(), total, cash = state.cash(), "payroll paid");

    Payroll {
        weeks,
        payments,
        total,
    }
}
