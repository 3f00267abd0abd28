use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::Direction;

/// Settlement state of an occurrence.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettlementStatus {
    #[default]
    Pending,
    Partial,
    Settled,
}

/// Role of an occurrence within its entry's plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OccurrenceRole {
    #[default]
    Scheduled,
    Installment,
    FinalSettlement,
    TaxChild,
}

/// A recorded payment against an occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

/// A concrete dated amount derived from exactly one budget entry.
///
/// Occurrences are generated, not stored as the source of truth for their
/// schedule; only the settlement history is authoritative once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub direction: Direction,
    #[serde(default)]
    pub role: OccurrenceRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub status: SettlementStatus,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Occurrence {
    pub fn is_settled(&self) -> bool {
        matches!(self.status, SettlementStatus::Settled)
    }

    /// Total recorded against this occurrence so far.
    pub fn paid_to_date(&self) -> f64 {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// Amount still outstanding.
    pub fn remaining(&self) -> f64 {
        self.amount - self.paid_to_date()
    }

    /// Records a payment and reclassifies the settlement status.
    pub fn record_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
        self.status = if self.paid_to_date() >= self.amount {
            SettlementStatus::Settled
        } else {
            SettlementStatus::Partial
        };
    }
}
