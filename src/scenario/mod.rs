//! Scenario overlays: sparse per-entry deltas resolved onto a base entry
//! collection, with regeneration of unsettled occurrences for touched entries.
//!
//! Resolution is a pure merge: `resolve(base, [])` is identity, re-applying
//! with an empty delta set changes nothing, and delta order is irrelevant
//! because each entry id is targeted by at most one delta per scenario.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator;
use crate::model::{
    BudgetEntry, CashAccount, Direction, FrequencyKind, Occurrence, ProvisionDetails, Schedule,
    TaxMetadata,
};

/// Field-overriding patch for one base entry. `None` keeps the base value;
/// nested options distinguish "leave" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntryPatch {
    pub entry_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision: Option<Option<ProvisionDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Option<TaxMetadata>>,
}

impl EntryPatch {
    pub fn new(entry_id: Uuid) -> Self {
        Self {
            entry_id,
            ..Self::default()
        }
    }

    pub fn has_effect(&self) -> bool {
        self.name.is_some()
            || self.direction.is_some()
            || self.frequency.is_some()
            || self.amount.is_some()
            || self.schedule.is_some()
            || self.category_id.is_some()
            || self.provision.is_some()
            || self.tax.is_some()
    }

    /// Whether applying the patch changes the entry's generated occurrences.
    pub fn reshapes_plan(&self) -> bool {
        self.direction.is_some()
            || self.frequency.is_some()
            || self.amount.is_some()
            || self.schedule.is_some()
            || self.provision.is_some()
    }

    /// Shallow field-by-field override: a set patch field wins, everything
    /// else keeps the base value.
    fn apply(&self, base: &BudgetEntry) -> BudgetEntry {
        let mut merged = base.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(direction) = self.direction {
            merged.direction = direction;
        }
        if let Some(frequency) = self.frequency {
            merged.frequency = frequency;
        }
        if let Some(amount) = self.amount {
            merged.amount = amount;
        }
        if let Some(schedule) = &self.schedule {
            merged.schedule = schedule.clone();
        }
        if let Some(category_id) = self.category_id {
            merged.category_id = category_id;
        }
        if let Some(provision) = &self.provision {
            merged.provision = provision.clone();
        }
        if let Some(tax) = self.tax {
            merged.tax = tax;
        }
        merged
    }
}

/// One sparse change inside a scenario: a brand-new entry, a field patch, or
/// a tombstone marking the base entry removed within the scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioDelta {
    Add { entry: BudgetEntry },
    Modify(EntryPatch),
    Remove { entry_id: Uuid },
}

impl ScenarioDelta {
    /// Id of the entry this delta targets.
    pub fn entry_id(&self) -> Uuid {
        match self {
            ScenarioDelta::Add { entry } => entry.id,
            ScenarioDelta::Modify(patch) => patch.entry_id,
            ScenarioDelta::Remove { entry_id } => *entry_id,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, ScenarioDelta::Remove { .. })
    }
}

/// Overlays `deltas` onto `base_entries`, producing the effective entry
/// collection. Tombstoned entries are dropped, patched entries are merged
/// field-by-field, and additions matching no base id are appended in id
/// order. A patch or tombstone referencing an unknown id is a no-op.
pub fn resolve(base_entries: &[BudgetEntry], deltas: &[ScenarioDelta]) -> Vec<BudgetEntry> {
    let by_id: HashMap<Uuid, &ScenarioDelta> =
        deltas.iter().map(|delta| (delta.entry_id(), delta)).collect();

    let mut resolved = Vec::with_capacity(base_entries.len());
    let mut consumed: HashSet<Uuid> = HashSet::new();
    for base in base_entries {
        match by_id.get(&base.id) {
            Some(ScenarioDelta::Remove { .. }) => {
                consumed.insert(base.id);
            }
            Some(ScenarioDelta::Modify(patch)) => {
                consumed.insert(base.id);
                resolved.push(patch.apply(base));
            }
            // An addition colliding with an existing id replaces it outright.
            Some(ScenarioDelta::Add { entry }) => {
                consumed.insert(base.id);
                resolved.push(entry.clone());
            }
            None => resolved.push(base.clone()),
        }
    }

    let mut appended: HashSet<Uuid> = HashSet::new();
    let mut additions: Vec<&BudgetEntry> = Vec::new();
    for delta in deltas {
        let id = delta.entry_id();
        if consumed.contains(&id) || appended.contains(&id) {
            continue;
        }
        if let ScenarioDelta::Add { entry } = delta {
            appended.insert(id);
            additions.push(entry);
        }
    }
    // Sorted by id so the result does not depend on delta order.
    additions.sort_by_key(|entry| entry.id);
    resolved.extend(additions.into_iter().cloned());

    tracing::debug!(
        base = base_entries.len(),
        deltas = deltas.len(),
        resolved = resolved.len(),
        "resolved scenario overlay"
    );
    resolved
}

/// Entry ids whose generated plan a delta set reshapes, including removals.
pub fn touched_ids(deltas: &[ScenarioDelta]) -> HashSet<Uuid> {
    deltas
        .iter()
        .filter(|delta| match delta {
            ScenarioDelta::Add { .. } | ScenarioDelta::Remove { .. } => true,
            ScenarioDelta::Modify(patch) => patch.reshapes_plan(),
        })
        .map(|delta| delta.entry_id())
        .collect()
}

/// Rebuilds the occurrence set after resolution.
///
/// Settled occurrences pass through untouched regardless of later plan edits;
/// realized financial history is immutable. Unsettled occurrences of touched
/// or removed entries are discarded and regenerated from the merged entries,
/// and a regenerated occurrence landing on a date already covered by a
/// settled one is suppressed.
pub fn regenerate(
    resolved: &[BudgetEntry],
    occurrences: &[Occurrence],
    accounts: &[CashAccount],
    touched: &HashSet<Uuid>,
) -> Vec<Occurrence> {
    let settled_dates: HashSet<(Uuid, NaiveDate)> = occurrences
        .iter()
        .filter(|occ| occ.is_settled())
        .map(|occ| (occ.budget_id, occ.date))
        .collect();
    let resolved_ids: HashSet<Uuid> = resolved.iter().map(|entry| entry.id).collect();

    let mut result = Vec::new();
    for occ in occurrences {
        if occ.is_settled() {
            result.push(occ.clone());
            continue;
        }
        if touched.contains(&occ.budget_id) || !resolved_ids.contains(&occ.budget_id) {
            continue;
        }
        result.push(occ.clone());
    }

    for entry in resolved {
        if !touched.contains(&entry.id) {
            continue;
        }
        for occ in generator::generate(entry, accounts) {
            if settled_dates.contains(&(occ.budget_id, occ.date)) {
                continue;
            }
            result.push(occ);
        }
    }

    result
}

/// Resolves a scenario and regenerates the affected occurrences in one pass.
pub fn resolve_and_regenerate(
    base_entries: &[BudgetEntry],
    deltas: &[ScenarioDelta],
    occurrences: &[Occurrence],
    accounts: &[CashAccount],
) -> (Vec<BudgetEntry>, Vec<Occurrence>) {
    let resolved = resolve(base_entries, deltas);
    let touched = touched_ids(deltas);
    let regenerated = regenerate(&resolved, occurrences, accounts, &touched);
    (resolved, regenerated)
}
