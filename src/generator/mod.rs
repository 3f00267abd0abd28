//! Occurrence generation: expands one budget entry into a finite,
//! deterministic sequence of dated cash-flow occurrences.
//!
//! Generation is pure and total. Entries whose temporal fields do not match
//! their frequency kind contribute zero occurrences, so a single malformed
//! entry never aborts a batch projection.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::calendar::shift_months;
use crate::model::{
    BudgetEntry, CashAccount, Direction, FrequencyKind, Occurrence, OccurrenceRole, Payment,
    Schedule, SettlementStatus,
};

/// Hard cap on occurrences produced for a single entry.
pub const MAX_OCCURRENCES: usize = 1024;
/// Open-ended schedules are truncated this far past their start.
pub const OPEN_END_HORIZON_DAYS: i64 = 365 * 5;

const PENDING_WINDOW_DAYS: i64 = 7;

type OccurrenceStrategy = fn(&BudgetEntry, &[CashAccount]) -> Vec<Occurrence>;

static STRATEGIES: Lazy<HashMap<FrequencyKind, OccurrenceStrategy>> = Lazy::new(|| {
    use FrequencyKind::*;
    let mut table: HashMap<FrequencyKind, OccurrenceStrategy> = HashMap::new();
    table.insert(OneOff, one_off as OccurrenceStrategy);
    table.insert(Daily, recurring);
    table.insert(Weekly, recurring);
    table.insert(Monthly, recurring);
    table.insert(Bimonthly, recurring);
    table.insert(Quarterly, recurring);
    table.insert(Yearly, recurring);
    table.insert(Irregular, irregular);
    table.insert(Provision, provision);
    table
});

/// Expands `entry` into dated occurrences. Deterministic: identical inputs
/// yield identical dates, amounts, and ids.
pub fn generate(entry: &BudgetEntry, accounts: &[CashAccount]) -> Vec<Occurrence> {
    STRATEGIES
        .get(&entry.frequency)
        .map(|strategy| strategy(entry, accounts))
        .unwrap_or_default()
}

/// Sum of the entry's generated occurrence amounts dated within
/// `[period_start, period_end)`.
pub fn amount_in_period(entry: &BudgetEntry, period_start: NaiveDate, period_end: NaiveDate) -> f64 {
    generate(entry, &[])
        .iter()
        .filter(|occ| occ.date >= period_start && occ.date < period_end)
        .map(|occ| occ.amount)
        .sum()
}

/// Coarse urgency of a scheduled date relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledStatus {
    Overdue,
    Pending,
    Future,
}

impl ScheduledStatus {
    pub fn classify(scheduled: NaiveDate, reference: NaiveDate) -> ScheduledStatus {
        if scheduled < reference {
            return ScheduledStatus::Overdue;
        }
        if scheduled <= reference + Duration::days(PENDING_WINDOW_DAYS) {
            ScheduledStatus::Pending
        } else {
            ScheduledStatus::Future
        }
    }
}

/// Aggregate flows over a batch of occurrences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionTotals {
    pub generated: usize,
    pub projected_inflow: f64,
    pub projected_outflow: f64,
    pub net: f64,
}

impl ProjectionTotals {
    pub fn from_occurrences(occurrences: &[Occurrence]) -> Self {
        let mut totals = ProjectionTotals {
            generated: occurrences.len(),
            ..ProjectionTotals::default()
        };
        for occ in occurrences {
            match occ.direction {
                Direction::Inflow => totals.projected_inflow += occ.amount,
                Direction::Outflow => totals.projected_outflow += occ.amount,
            }
        }
        totals.net = totals.projected_inflow - totals.projected_outflow;
        totals
    }
}

/// Stable id for occurrence `index` of an entry, so regeneration from the
/// same inputs reproduces the same ids.
fn occurrence_id(entry: &BudgetEntry, index: u32) -> Uuid {
    Uuid::new_v5(&entry.id, &index.to_be_bytes())
}

fn occurrence(
    entry: &BudgetEntry,
    index: u32,
    date: NaiveDate,
    amount: f64,
    role: OccurrenceRole,
    account_id: Option<Uuid>,
) -> Occurrence {
    Occurrence {
        id: occurrence_id(entry, index),
        budget_id: entry.id,
        date,
        amount,
        direction: entry.direction,
        role,
        account_id,
        category_id: entry.category_id,
        status: SettlementStatus::Pending,
        payments: Vec::new(),
    }
}

fn one_off(entry: &BudgetEntry, accounts: &[CashAccount]) -> Vec<Occurrence> {
    let date = match &entry.schedule {
        Schedule::On { date } => *date,
        _ => return Vec::new(),
    };
    let mut occ = occurrence(entry, 0, date, entry.amount, OccurrenceRole::Scheduled, None);
    if entry.loan_principal {
        // Principal movements are realized the moment they are planned.
        if let Some(account) = CashAccount::first_open(accounts) {
            occ.record_payment(Payment {
                date,
                amount: entry.amount,
                account_id: Some(account.id),
            });
        }
    }
    vec![occ]
}

fn recurring(entry: &BudgetEntry, _accounts: &[CashAccount]) -> Vec<Occurrence> {
    let (start, end) = match &entry.schedule {
        Schedule::Span { start, end } => (*start, *end),
        _ => return Vec::new(),
    };
    let horizon = end.unwrap_or(start + Duration::days(OPEN_END_HORIZON_DAYS));
    let mut result = Vec::new();
    let mut index = 0u32;
    while result.len() < MAX_OCCURRENCES {
        let date = match nth_date(entry.frequency, start, index) {
            Some(date) => date,
            None => break,
        };
        if date > horizon {
            break;
        }
        result.push(occurrence(
            entry,
            index,
            date,
            entry.amount,
            OccurrenceRole::Scheduled,
            None,
        ));
        index += 1;
    }
    result
}

/// Date of step `index`, recomputed from the original anchor every time so a
/// clamped month end (Jan 31 -> Feb 29) does not shift later steps.
fn nth_date(kind: FrequencyKind, anchor: NaiveDate, index: u32) -> Option<NaiveDate> {
    match kind {
        FrequencyKind::Daily => anchor.checked_add_signed(Duration::days(index as i64)),
        FrequencyKind::Weekly => anchor.checked_add_signed(Duration::weeks(index as i64)),
        _ => kind
            .month_step()
            .map(|step| shift_months(anchor, step as i32 * index as i32)),
    }
}

fn irregular(entry: &BudgetEntry, _accounts: &[CashAccount]) -> Vec<Occurrence> {
    let payments = match &entry.schedule {
        Schedule::Listed { payments } => payments,
        _ => return Vec::new(),
    };
    payments
        .iter()
        .enumerate()
        .map(|(i, listed)| {
            occurrence(
                entry,
                i as u32,
                listed.date,
                listed.amount,
                OccurrenceRole::Scheduled,
                None,
            )
        })
        .collect()
}

fn provision(entry: &BudgetEntry, _accounts: &[CashAccount]) -> Vec<Occurrence> {
    let details = match &entry.provision {
        Some(details) => details,
        None => return Vec::new(),
    };
    let mut result = Vec::new();
    if details.installments > 0 {
        let start = match &entry.schedule {
            Schedule::Span { start, .. } => *start,
            Schedule::On { date } => *date,
            _ => shift_months(details.final_payment_date, -(details.installments as i32)),
        };
        let per_installment = entry.amount / details.installments as f64;
        for i in 0..details.installments.min(MAX_OCCURRENCES as u32) {
            result.push(occurrence(
                entry,
                i,
                shift_months(start, i as i32),
                per_installment,
                OccurrenceRole::Installment,
                Some(details.installment_account),
            ));
        }
    }
    result.push(occurrence(
        entry,
        details.installments,
        details.final_payment_date,
        entry.amount,
        OccurrenceRole::FinalSettlement,
        None,
    ));
    result
}
