//! Domain value types consumed from and exposed to the surrounding system.

pub mod account;
pub mod entry;
pub mod occurrence;

pub use account::CashAccount;
pub use entry::{
    BudgetEntry, Direction, FrequencyKind, ListedPayment, ProvisionDetails, Schedule, TaxMetadata,
};
pub use occurrence::{Occurrence, OccurrenceRole, Payment, SettlementStatus};
