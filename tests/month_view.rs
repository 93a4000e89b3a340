use chrono::NaiveDate;
use utero_lib::config::AppSettings;
use utero_lib::models::DayCategory;
use utero_lib::{classify, predict, CycleInputs, Tracker, YearMonth};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn january_inputs() -> CycleInputs {
    CycleInputs {
        last_period_date: Some(date("2024-01-01")),
        cycle_length: 28,
        period_length: 5,
    }
}

#[test]
fn january_2024_worked_example() {
    let pred = predict(&january_inputs()).unwrap();
    assert_eq!(pred.next_period_start_date, date("2024-01-29"));
    assert_eq!(pred.ovulation_date, date("2024-01-15"));
    assert_eq!(pred.fertile_window_start, date("2024-01-10"));
    assert_eq!(pred.fertile_window_end, date("2024-01-16"));

    let today = date("2024-02-20");
    assert_eq!(
        classify(date("2024-01-03"), Some(&pred), today).category,
        DayCategory::Period
    );
    assert_eq!(
        classify(date("2024-01-15"), Some(&pred), today).category,
        DayCategory::Ovulation
    );
}

#[test]
fn short_cycle_has_no_prediction() {
    let inputs = CycleInputs {
        cycle_length: 10,
        ..january_inputs()
    };
    assert!(predict(&inputs).is_none());

    let today = date("2024-01-03");
    assert_eq!(classify(today, None, today).to_string(), "Today");
    assert_eq!(classify(date("2024-01-04"), None, today).to_string(), "Plain");
}

#[test]
fn tracker_renders_highlighted_month() {
    let today = date("2024-01-01");
    let mut tracker = Tracker::new(&AppSettings::default(), today);
    tracker.set_inputs(january_inputs());

    let view = tracker.month_view(today).unwrap();
    assert_eq!(view.year, 2024);
    assert_eq!(view.month, 1);

    let count = |category: DayCategory| {
        view.weeks
            .iter()
            .flatten()
            .filter(|c| c.in_displayed_month && c.classification.category == category)
            .count()
    };
    // Jan 1-5 and Jan 29-31.
    assert_eq!(count(DayCategory::Period), 8);
    assert_eq!(count(DayCategory::Ovulation), 1);
    // Jan 10-14 and Jan 16.
    assert_eq!(count(DayCategory::Fertile), 6);

    let todays: Vec<_> = view
        .weeks
        .iter()
        .flatten()
        .filter(|c| c.classification.is_today)
        .collect();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].classification.to_string(), "Period + Today");
}

#[test]
fn distant_months_show_no_highlighting() {
    let today = date("2024-01-01");
    let mut tracker = Tracker::new(&AppSettings::default(), today);
    tracker.set_inputs(january_inputs());
    tracker.show_month(YearMonth::new(2027, 3).unwrap());

    let view = tracker.month_view(today).unwrap();
    assert!(view
        .weeks
        .iter()
        .flatten()
        .all(|c| c.classification.category == DayCategory::Plain));
}

#[test]
fn stepping_back_reaches_previous_cycles() {
    let today = date("2024-01-01");
    let mut tracker = Tracker::new(&AppSettings::default(), today);
    tracker.set_inputs(january_inputs());
    tracker.step_month(-1).unwrap();

    let view = tracker.month_view(today).unwrap();
    assert_eq!(view.title, "December 2023");
    let period_start = view
        .weeks
        .iter()
        .flatten()
        .find(|c| c.date == date("2023-12-04"))
        .unwrap();
    assert_eq!(period_start.classification.category, DayCategory::Period);
}
