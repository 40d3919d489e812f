//! Domain models for the hatchery simulator

pub mod event;
pub mod ledger;
pub mod product;
pub mod resource;
pub mod site;
pub mod staff;
pub mod state;
pub mod vendor;

// Re-exports
pub use event::{Event, EventLog};
pub use ledger::SaleLedger;
pub use product::{Product, ProductCatalog};
pub use resource::{PerResource, ResourceKind};
pub use site::StorageSite;
pub use staff::{Roster, StaffingError, Technician};
pub use state::HatcheryState;
pub use vendor::Vendor;
