use cashflow_core::generator::generate;
use cashflow_core::model::{
    BudgetEntry, Direction, FrequencyKind, Occurrence, Payment, Schedule, SettlementStatus,
};
use cashflow_core::scenario::{
    resolve, resolve_and_regenerate, EntryPatch, ScenarioDelta,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn monthly_entry(name: &str, amount: f64, start: NaiveDate) -> BudgetEntry {
    BudgetEntry::new(
        name,
        Direction::Outflow,
        FrequencyKind::Monthly,
        amount,
        Schedule::Span { start, end: None },
    )
}

fn settle(occ: &mut Occurrence) {
    let amount = occ.amount;
    let paid_on = occ.date;
    occ.record_payment(Payment {
        date: paid_on,
        amount,
        account_id: None,
    });
    assert_eq!(occ.status, SettlementStatus::Settled);
}

#[test]
fn empty_delta_set_is_identity() {
    let base = vec![
        monthly_entry("Rent", 950.0, date(2025, 1, 1)),
        monthly_entry("Groceries", 400.0, date(2025, 1, 5)),
    ];
    assert_eq!(resolve(&base, &[]), base);
}

#[test]
fn resolution_is_idempotent() {
    let base = vec![monthly_entry("Rent", 950.0, date(2025, 1, 1))];
    let mut patch = EntryPatch::new(base[0].id);
    patch.amount = Some(1000.0);
    let deltas = vec![ScenarioDelta::Modify(patch)];

    let once = resolve(&base, &deltas);
    assert_eq!(resolve(&once, &[]), once);
}

#[test]
fn delta_order_does_not_affect_the_result() {
    let base = vec![
        monthly_entry("Rent", 950.0, date(2025, 1, 1)),
        monthly_entry("Groceries", 400.0, date(2025, 1, 5)),
    ];
    let mut patch = EntryPatch::new(base[1].id);
    patch.amount = Some(450.0);
    let added = monthly_entry("Gym", 35.0, date(2025, 2, 1));

    let forward = vec![
        ScenarioDelta::Modify(patch.clone()),
        ScenarioDelta::Add {
            entry: added.clone(),
        },
        ScenarioDelta::Remove {
            entry_id: base[0].id,
        },
    ];
    let reversed: Vec<ScenarioDelta> = forward.iter().rev().cloned().collect();
    assert_eq!(resolve(&base, &forward), resolve(&base, &reversed));
}

#[test]
fn tombstone_drops_the_entry_and_its_unsettled_occurrences() {
    let doomed = monthly_entry("Subscription", 15.0, date(2025, 1, 1));
    let kept = monthly_entry("Rent", 950.0, date(2025, 1, 1));
    let doomed_id = doomed.id;

    let mut occurrences = generate(&doomed, &[]);
    occurrences.extend(generate(&kept, &[]));
    settle(&mut occurrences[0]);

    let deltas = vec![ScenarioDelta::Remove {
        entry_id: doomed_id,
    }];
    assert!(deltas[0].is_tombstone());
    let (resolved, regenerated) =
        resolve_and_regenerate(&[doomed, kept.clone()], &deltas, &occurrences, &[]);

    assert_eq!(resolved, vec![kept]);
    assert!(regenerated
        .iter()
        .all(|occ| occ.budget_id != doomed_id || occ.is_settled()));
    // The settled January payment survives as realized history.
    assert!(regenerated
        .iter()
        .any(|occ| occ.budget_id == doomed_id && occ.is_settled()));
}

#[test]
fn unknown_delta_targets_are_no_ops() {
    let base = vec![monthly_entry("Rent", 950.0, date(2025, 1, 1))];
    let mut patch = EntryPatch::new(uuid::Uuid::new_v4());
    patch.amount = Some(1.0);
    let deltas = vec![
        ScenarioDelta::Modify(patch),
        ScenarioDelta::Remove {
            entry_id: uuid::Uuid::new_v4(),
        },
    ];
    assert_eq!(resolve(&base, &deltas), base);
}

#[test]
fn additions_without_a_base_match_are_appended() {
    let base = vec![monthly_entry("Rent", 950.0, date(2025, 1, 1))];
    let added = monthly_entry("Gym", 35.0, date(2025, 2, 1));
    let deltas = vec![ScenarioDelta::Add {
        entry: added.clone(),
    }];
    let resolved = resolve(&base, &deltas);
    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains(&added));
}

#[test]
fn amount_patch_regenerates_pending_but_never_settled_occurrences() {
    let entry = monthly_entry("Rent", 500.0, date(2025, 1, 1));
    let entry_id = entry.id;

    let mut occurrences = generate(&entry, &[]);
    settle(&mut occurrences[0]);

    let mut patch = EntryPatch::new(entry_id);
    patch.amount = Some(600.0);
    let deltas = vec![ScenarioDelta::Modify(patch)];

    let (resolved, regenerated) =
        resolve_and_regenerate(&[entry], &deltas, &occurrences, &[]);

    assert_eq!(resolved[0].amount, 600.0);

    let settled: Vec<_> = regenerated.iter().filter(|occ| occ.is_settled()).collect();
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].amount, 500.0);
    assert_eq!(settled[0].date, date(2025, 1, 1));

    let pending: Vec<_> = regenerated.iter().filter(|occ| !occ.is_settled()).collect();
    assert!(!pending.is_empty());
    assert!(pending.iter().all(|occ| occ.amount == 600.0));
    // The settled date is not regenerated alongside the historical record.
    assert!(pending.iter().all(|occ| occ.date != date(2025, 1, 1)));
}

#[test]
fn cosmetic_patches_leave_occurrences_untouched() {
    let entry = monthly_entry("Rent", 500.0, date(2025, 1, 1));
    let occurrences = generate(&entry, &[]);

    let mut patch = EntryPatch::new(entry.id);
    patch.name = Some("Rent (renamed)".to_string());
    assert!(patch.has_effect());
    assert!(!patch.reshapes_plan());

    let (resolved, regenerated) = resolve_and_regenerate(
        &[entry],
        &[ScenarioDelta::Modify(patch)],
        &occurrences,
        &[],
    );
    assert_eq!(resolved[0].name, "Rent (renamed)");
    assert_eq!(regenerated, occurrences);
}
