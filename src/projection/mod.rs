//! Balance projection: walks calendar periods accumulating realized payments
//! up to the reference date and budgeted amounts beyond it, with the two
//! series meeting at a single continuity point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::generator::{self, ScheduledStatus};
use crate::model::{BudgetEntry, CashAccount, Occurrence};

/// Realized and projected balance series over one period window.
///
/// For every index except the continuity point exactly one series is
/// populated; at the period containing `today` both carry the same value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionResult {
    pub realized: Vec<Option<f64>>,
    pub projected: Vec<Option<f64>>,
}

/// Index of the period containing `today` under the half-open convention:
/// -1 when `today` precedes the window, the last index when it follows it.
fn today_index(periods: &[Period], today: NaiveDate) -> isize {
    if periods.is_empty() || today < periods[0].start {
        return -1;
    }
    for (i, period) in periods.iter().enumerate() {
        if period.contains(today) {
            return i as isize;
        }
    }
    periods.len() as isize - 1
}

/// Net realized flow inside a period: recorded payment amounts signed by the
/// parent occurrence's direction.
fn realized_net_in(occurrences: &[Occurrence], period: &Period) -> f64 {
    let mut net = 0.0;
    for occ in occurrences {
        let sign = occ.direction.sign();
        for payment in &occ.payments {
            if period.contains(payment.date) {
                net += sign * payment.amount;
            }
        }
    }
    net
}

/// Net budgeted flow inside a period over the effective entries.
fn budgeted_net_in(entries: &[BudgetEntry], period: &Period) -> f64 {
    entries
        .iter()
        .map(|entry| entry.direction.sign() * generator::amount_in_period(entry, period.start, period.end))
        .sum()
}

/// Walks `periods` producing the realized and projected balance series.
///
/// The starting balance folds in account initial balances plus all payments
/// dated before the window, so the first visible balance reflects pre-window
/// history. Before projecting forward, the net remaining amount of overdue
/// unsettled occurrences seeds the forward baseline; the continuity point at
/// the period containing `today` is shared verbatim between both series.
pub fn project_balances(
    periods: &[Period],
    occurrences: &[Occurrence],
    entries: &[BudgetEntry],
    accounts: &[CashAccount],
    today: NaiveDate,
) -> ProjectionResult {
    let count = periods.len();
    let mut realized = vec![None; count];
    let mut projected = vec![None; count];
    if count == 0 {
        return ProjectionResult { realized, projected };
    }

    let today_idx = today_index(periods, today);
    let window_start = periods[0].start;

    let mut running: f64 = accounts.iter().map(|account| account.initial_balance).sum();
    for occ in occurrences {
        let sign = occ.direction.sign();
        for payment in &occ.payments {
            if payment.date < window_start {
                running += sign * payment.amount;
            }
        }
    }

    if today_idx >= 0 {
        for (i, period) in periods.iter().enumerate().take(today_idx as usize + 1) {
            running += realized_net_in(occurrences, period);
            realized[i] = Some(running);
        }
        projected[today_idx as usize] = realized[today_idx as usize];
    }

    // Overdue remainders are already budgeted and now late; folding them into
    // the baseline once keeps them from being counted twice.
    let overdue: f64 = occurrences
        .iter()
        .filter(|occ| {
            !occ.is_settled() && ScheduledStatus::classify(occ.date, today) == ScheduledStatus::Overdue
        })
        .map(|occ| occ.direction.sign() * occ.remaining())
        .sum();

    let mut forward = running + overdue;
    for i in (today_idx + 1).max(0) as usize..count {
        forward += budgeted_net_in(entries, &periods[i]);
        projected[i] = Some(forward);
    }

    tracing::debug!(
        periods = count,
        today_index = today_idx,
        "projected balance series"
    );
    ProjectionResult { realized, projected }
}
