//! Period-End Costs
//!
//! Operations run once per period after trading closes, in this order:
//!
//! 1. [`bill_storage`]: fixed base fee plus per-unit holding cost of remaining stock
//! 2. [`depreciate_all`]: ceiling-rounded proportional loss at every site
//! 3. [`pay_roster`]: weekly rate x weeks per period for every technician
//! 4. [`restock`]: top the pool back up to capacity from one vendor, if affordable
//!
//! None of these refuse to run on low cash; a negative balance afterwards is
//! the bankruptcy signal the orchestrator acts on.
//!
//! CRITICAL: All money values are i64 (pence)

pub mod payroll;
pub mod restock;
pub mod storage;

pub use payroll::{pay_roster, Payroll, TechnicianPayment};
pub use restock::{restock, RestockLine, RestockOutcome, RestockReport};
pub use storage::{bill_storage, depreciate_all, SiteDepreciation, SiteStorageCost, StorageBill};
