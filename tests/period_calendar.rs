use cashflow_core::calendar::{compute_periods, resolve_quick_select, Period, QuickSelect, TimeUnit};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_periods_are_contiguous_and_aligned() {
    let periods = compute_periods(TimeUnit::Month, 3, 0, date(2025, 8, 25));
    assert_eq!(periods.len(), 3);
    assert_eq!(periods[0].start, date(2025, 8, 1));
    assert_eq!(periods[0].end, date(2025, 9, 1));
    assert_eq!(periods[2].end, date(2025, 11, 1));
    for pair in periods.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(periods[0].label, "2025-08");
}

#[test]
fn offset_shifts_the_visible_window() {
    let today = date(2025, 8, 25);
    let shifted = compute_periods(TimeUnit::Month, 2, -1, today);
    assert_eq!(shifted[0].start, date(2025, 7, 1));
    assert_eq!(shifted[1].start, date(2025, 8, 1));

    let forward = compute_periods(TimeUnit::Month, 1, 2, today);
    assert_eq!(forward[0].start, date(2025, 10, 1));
}

#[test]
fn weekly_periods_start_on_monday() {
    let periods = compute_periods(TimeUnit::Week, 2, 0, date(2025, 8, 27));
    assert_eq!(periods[0].start, date(2025, 8, 25));
    assert_eq!(periods[0].end, date(2025, 9, 1));
    assert_eq!(periods[1].end, date(2025, 9, 8));
}

#[test]
fn fortnight_periods_split_on_the_sixteenth() {
    let periods = compute_periods(TimeUnit::Fortnight, 3, 0, date(2025, 8, 20));
    assert_eq!(periods[0].start, date(2025, 8, 16));
    assert_eq!(periods[0].end, date(2025, 9, 1));
    assert_eq!(periods[1].end, date(2025, 9, 16));
    assert_eq!(periods[2].end, date(2025, 10, 1));
}

#[test]
fn custom_period_construction_rejects_inverted_ranges() {
    let period = Period::new(date(2025, 8, 1), date(2025, 9, 1), "2025-08").unwrap();
    assert!(period.contains(date(2025, 8, 31)));

    assert!(Period::new(date(2025, 9, 1), date(2025, 8, 1), "backwards").is_err());
    assert!(Period::new(date(2025, 8, 1), date(2025, 8, 1), "empty").is_err());
}

#[test]
fn periods_are_half_open() {
    let periods = compute_periods(TimeUnit::Month, 1, 0, date(2025, 8, 25));
    let period = &periods[0];
    assert!(period.contains(period.start));
    assert!(!period.contains(period.end));
}

#[test]
fn quarter_and_year_labels() {
    let quarter = compute_periods(TimeUnit::Quarter, 1, 0, date(2025, 8, 25));
    assert_eq!(quarter[0].label, "2025-Q3");
    assert_eq!(quarter[0].start, date(2025, 7, 1));
    assert_eq!(quarter[0].end, date(2025, 10, 1));

    let year = compute_periods(TimeUnit::Year, 1, 0, date(2025, 8, 25));
    assert_eq!(year[0].label, "2025");
    assert_eq!(year[0].start, date(2025, 1, 1));
    assert_eq!(year[0].end, date(2026, 1, 1));
}

#[test]
fn quick_select_today_is_a_single_day() {
    let spec = resolve_quick_select("today", date(2025, 8, 25)).unwrap();
    let periods = compute_periods(spec.unit, spec.horizon_length, spec.offset, date(2025, 8, 25));
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].start, date(2025, 8, 25));
    assert_eq!(periods[0].end, date(2025, 8, 26));
}

#[test]
fn quick_select_this_week_covers_monday_to_sunday() {
    let today = date(2025, 8, 27);
    let spec = resolve_quick_select("this week", today).unwrap();
    let periods = compute_periods(spec.unit, spec.horizon_length, spec.offset, today);
    assert_eq!(periods.len(), 7);
    assert_eq!(periods.first().unwrap().start, date(2025, 8, 25));
    assert_eq!(periods.last().unwrap().end, date(2025, 9, 1));
}

#[test]
fn quick_select_this_year_spans_january_to_january() {
    let today = date(2025, 8, 25);
    let spec = resolve_quick_select("this year", today).unwrap();
    let periods = compute_periods(spec.unit, spec.horizon_length, spec.offset, today);
    assert_eq!(periods.len(), 12);
    assert_eq!(periods.first().unwrap().start, date(2025, 1, 1));
    assert_eq!(periods.last().unwrap().end, date(2026, 1, 1));
}

#[test]
fn quick_select_multi_year_presets_align_to_calendar_blocks() {
    let today = date(2025, 8, 25);

    let two = QuickSelect::TwoYears.resolve(today);
    let periods = compute_periods(two.unit, two.horizon_length, two.offset, today);
    assert_eq!(periods.len(), 8);
    assert_eq!(periods.first().unwrap().start, date(2025, 1, 1));
    assert_eq!(periods.last().unwrap().end, date(2027, 1, 1));

    let five = QuickSelect::FiveYears.resolve(today);
    let periods = compute_periods(five.unit, five.horizon_length, five.offset, today);
    assert_eq!(periods.len(), 10);
    assert_eq!(periods.first().unwrap().start, date(2025, 1, 1));
    assert_eq!(periods.last().unwrap().end, date(2030, 1, 1));
}

#[test]
fn quick_select_name_parsing_accepts_separator_variants() {
    let today = date(2025, 8, 25);
    assert_eq!(
        resolve_quick_select("this_quarter", today).unwrap(),
        resolve_quick_select("This Quarter", today).unwrap()
    );
    assert!(resolve_quick_select("next decade", today).is_err());
}
