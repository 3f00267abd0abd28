//! Derives synthetic tax-child occurrences from entries carrying tax
//! metadata, so the VAT portion of a payment can be tracked and provisioned
//! separately from the gross movement.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::model::{BudgetEntry, Occurrence, OccurrenceRole, SettlementStatus};

/// Category under which synthesized tax children are filed.
pub const TAX_CATEGORY_ID: Uuid = Uuid::from_u128(0x7ae1_d6f0_3c2b_4b8e_9f41_c54c_87a0_d9e2);

const TAX_CHILD_NAME: &[u8] = b"vat-child";

/// Deterministic id for the tax child of a parent occurrence, so later edits
/// or deletes of the parent can locate and reverse the child.
pub fn tax_child_id(parent_id: Uuid) -> Uuid {
    Uuid::new_v5(&parent_id, TAX_CHILD_NAME)
}

/// Tax portion of `amount` under a fractional rate. Inclusive amounts carry
/// the tax inside the gross figure, exclusive amounts attract it on top.
fn tax_portion(amount: f64, rate: f64, inclusive: bool) -> f64 {
    if inclusive {
        amount * rate / (1.0 + rate)
    } else {
        amount * rate
    }
}

/// Synthesizes the tax child for `parent`, if its entry carries tax metadata.
/// The child shares the parent's date and direction and back-references the
/// same budget entry.
pub fn expand(entry: &BudgetEntry, parent: &Occurrence) -> Option<Occurrence> {
    let tax = entry.tax?;
    if tax.rate <= 0.0 {
        return None;
    }
    Some(Occurrence {
        id: tax_child_id(parent.id),
        budget_id: entry.id,
        date: parent.date,
        amount: tax_portion(parent.amount, tax.rate, tax.inclusive),
        direction: parent.direction,
        role: OccurrenceRole::TaxChild,
        account_id: None,
        category_id: Some(TAX_CATEGORY_ID),
        status: SettlementStatus::Pending,
        payments: Vec::new(),
    })
}

/// Expands every tax-carrying occurrence in a batch, appending each child
/// directly after its parent. Idempotent: a parent whose child is already in
/// the batch is not expanded again, so re-running over an expanded batch
/// never duplicates ids.
pub fn expand_all(entries: &[BudgetEntry], occurrences: &[Occurrence]) -> Vec<Occurrence> {
    let by_id: HashMap<Uuid, &BudgetEntry> = entries.iter().map(|entry| (entry.id, entry)).collect();
    let existing: HashSet<Uuid> = occurrences
        .iter()
        .filter(|occ| occ.role == OccurrenceRole::TaxChild)
        .map(|occ| occ.id)
        .collect();
    let mut result = Vec::with_capacity(occurrences.len());
    for occ in occurrences {
        result.push(occ.clone());
        if occ.role == OccurrenceRole::TaxChild || existing.contains(&tax_child_id(occ.id)) {
            continue;
        }
        if let Some(entry) = by_id.get(&occ.budget_id) {
            if let Some(child) = expand(entry, occ) {
                result.push(child);
            }
        }
    }
    result
}
