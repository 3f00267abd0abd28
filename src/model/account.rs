use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cash account: an initial balance and the date it applies from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashAccount {
    pub id: Uuid,
    pub name: String,
    pub initial_balance: f64,
    pub initial_date: NaiveDate,
    #[serde(default)]
    pub closed: bool,
}

impl CashAccount {
    pub fn new(name: impl Into<String>, initial_balance: f64, initial_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initial_balance,
            initial_date,
            closed: false,
        }
    }

    /// First account still open, in input order.
    pub fn first_open(accounts: &[CashAccount]) -> Option<&CashAccount> {
        accounts.iter().find(|account| !account.closed)
    }
}
