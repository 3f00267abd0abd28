use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cash-flow direction of an entry, seen from the tracked accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Inflow,
    Outflow,
}

impl Direction {
    /// Sign applied when folding an amount into a running balance.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Inflow => 1.0,
            Direction::Outflow => -1.0,
        }
    }
}

/// Closed set of entry frequencies. Each kind maps to exactly one occurrence
/// strategy in `generator`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FrequencyKind {
    OneOff,
    Daily,
    Weekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Yearly,
    Irregular,
    Provision,
}

impl FrequencyKind {
    /// Months per step for the month-family kinds.
    pub fn month_step(self) -> Option<u32> {
        match self {
            FrequencyKind::Monthly => Some(1),
            FrequencyKind::Bimonthly => Some(2),
            FrequencyKind::Quarterly => Some(3),
            FrequencyKind::Yearly => Some(12),
            _ => None,
        }
    }
}

/// One explicit (date, amount) pair of an irregular entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListedPayment {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Temporal anchor of an entry.
///
/// A shape that does not match the entry's frequency kind contributes zero
/// occurrences rather than an error, so one malformed entry cannot abort a
/// batch projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    #[default]
    Unspecified,
    On {
        date: NaiveDate,
    },
    Span {
        start: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<NaiveDate>,
    },
    Listed {
        payments: Vec<ListedPayment>,
    },
}

/// Installment plan accumulating toward a single future final payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProvisionDetails {
    pub installment_account: Uuid,
    pub installments: u32,
    pub final_payment_date: NaiveDate,
}

/// Tax metadata carried by entries whose amounts embed or attract VAT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TaxMetadata {
    /// Fractional rate, e.g. 0.21 for 21%.
    pub rate: f64,
    /// Whether the entry amount already includes the tax portion.
    pub inclusive: bool,
}

/// A recurring or irregular financial commitment. The entry is the source of
/// truth for the schedule; its generated occurrences own only their
/// settlement history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub name: String,
    pub direction: Direction,
    pub frequency: FrequencyKind,
    pub amount: f64,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Loan-principal movements settle immediately against the first open
    /// account, a policy inherited from the surrounding system.
    #[serde(default)]
    pub loan_principal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision: Option<ProvisionDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxMetadata>,
}

impl BudgetEntry {
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        frequency: FrequencyKind,
        amount: f64,
        schedule: Schedule,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            direction,
            frequency,
            amount,
            schedule,
            category_id: None,
            loan_principal: false,
            provision: None,
            tax: None,
        }
    }

    pub fn with_provision(mut self, provision: ProvisionDetails) -> Self {
        self.provision = Some(provision);
        self
    }

    pub fn with_tax(mut self, tax: TaxMetadata) -> Self {
        self.tax = Some(tax);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}
