//! Console formatting for hatchery state and period reports

use hatchery_simulator_core::costs::RestockOutcome;
use hatchery_simulator_core::{
    HatcheryState, LaborPool, PeriodOutcome, PeriodReport, ResourceKind, SaleReceipt,
};
use std::fmt::Write;

/// Pence as pounds, e.g. `-£12.05`
pub fn money(pence: i64) -> String {
    let sign = if pence < 0 { "-" } else { "" };
    let abs = pence.unsigned_abs();
    format!("{}£{}.{:02}", sign, abs / 100, abs % 100)
}

fn quantity(kind: ResourceKind, amount: f64) -> String {
    format!("{:.2} {}", amount, kind.unit())
}

/// Products on offer this period, then the labor available
pub fn products(state: &HatcheryState, labor: &LaborPool) -> String {
    let mut out = String::from("\n=== The Number of Fish Available for Sale ===\n");
    for product in state.catalog().iter() {
        let _ = writeln!(
            out,
            "{}: {} units available for sale at {}",
            product.name(),
            product.demand(),
            money(product.price())
        );
    }
    let _ = write!(
        out,
        "\nTechnicians available: {}, Total working days: {:.1}",
        state.roster().len(),
        labor.remaining()
    );
    out
}

/// Stock left in the pool, one line per kind
pub fn pool(state: &HatcheryState) -> String {
    let mut out = String::from("Remaining resources in warehouse:");
    for kind in ResourceKind::ALL {
        let _ = write!(out, "\n - {}: {}", kind, quantity(kind, state.available(kind)));
    }
    out
}

pub fn receipt(receipt: &SaleReceipt) -> String {
    let mut out = format!(
        "Sold {} units of {} for {}",
        receipt.quantity,
        receipt.product,
        money(receipt.revenue)
    );
    if receipt.specialist_bonus {
        out.push_str(" (specialist on staff)");
    }
    let _ = write!(
        out,
        "\nTechnician days used: {:.2}, remaining: {:.2}",
        receipt.labor_days, receipt.labor_remaining
    );
    out
}

/// Full breakdown of a closed (or bankrupt) period
pub fn period(report: &PeriodReport) -> String {
    let mut out = String::from("\n=== Sales Summary ===\n");
    if report.units_sold.is_empty() {
        out.push_str("No fish sold\n");
    }
    for (product, units) in &report.units_sold {
        let _ = writeln!(out, "{}: {} units sold", product, units);
    }
    let _ = writeln!(out, "Revenue: {}", money(report.sales_revenue));
    let _ = writeln!(
        out,
        "Technician days used: {:.2} of {:.2}",
        report.labor_used, report.labor_available
    );

    out.push_str("\n=== Warehouse Cost ===\n");
    let _ = writeln!(out, "Paid fixed warehouse rent: {}", money(report.storage.base_fee));
    for site in &report.storage.sites {
        let _ = writeln!(out, "Storage cost for {}: {}", site.site, money(site.total));
    }
    let _ = writeln!(out, "Total storage cost: {}", money(report.storage.total));

    for site in &report.depreciation {
        let _ = writeln!(
            out,
            "{} after depreciation: {}, {}, {}",
            site.site,
            quantity(ResourceKind::Fertilizer, site.remaining.fertilizer),
            quantity(ResourceKind::Feed, site.remaining.feed),
            quantity(ResourceKind::Salt, site.remaining.salt),
        );
    }

    if let Some(payroll) = &report.payroll {
        out.push_str("\n=== Technician Payment Summary ===\n");
        for payment in &payroll.payments {
            let _ = writeln!(
                out,
                "Paid {}, weekly rate = {}, amount: {}",
                payment.name,
                money(payment.weekly_rate),
                money(payment.amount)
            );
        }
        let _ = writeln!(out, "Total technician payment: {}", money(payroll.total));
    }

    if let Some(restock) = &report.restock {
        out.push('\n');
        for line in &restock.lines {
            match &line.outcome {
                RestockOutcome::NotNeeded => {}
                RestockOutcome::Purchased {
                    delivered, cost, ..
                } => {
                    let _ = writeln!(
                        out,
                        "Purchased {} of {} from {} for {}",
                        quantity(line.resource, *delivered),
                        line.resource,
                        restock.vendor,
                        money(*cost)
                    );
                }
                RestockOutcome::Unaffordable {
                    cost,
                    cash_available,
                    ..
                } => {
                    let _ = writeln!(
                        out,
                        "Not enough cash to purchase {}. Needed: {}, Available: {}",
                        line.resource,
                        money(*cost),
                        money(*cash_available)
                    );
                }
            }
        }
    }

    match report.outcome {
        PeriodOutcome::Solvent => {
            let _ = write!(
                out,
                "\n--- End of Quarter {} ---\nCash balance after Quarter {}: {}\n----------------------------------",
                report.period,
                report.period,
                money(report.closing_cash)
            );
        }
        PeriodOutcome::Bankrupt { .. } => {
            let _ = write!(
                out,
                "\nCash balance: {}\nWent Bankrupt! Simulation terminated.",
                money(report.closing_cash)
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(0), "£0.00");
        assert_eq!(money(175_000), "£1750.00");
        assert_eq!(money(1_205), "£12.05");
        assert_eq!(money(-500_000), "-£5000.00");
    }
}
