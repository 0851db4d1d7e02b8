//! Pure calendar transformation: no state, no I/O. Turns a month's worth of
//! events into the day-bucketed structure the calendar page renders.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::AppError;
use crate::models::Event;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Render-ready view of one calendar month.
#[derive(Debug)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// (day-number, weekday) cells covering whole weeks; weekday is
    /// 0 = Monday .. 6 = Sunday and day-number 0 marks an adjacent-month
    /// padding cell.
    pub month_grid: Vec<(u32, u32)>,
    /// Buckets keyed 1..=31 unconditionally; days the month lacks stay empty.
    pub events_by_day: BTreeMap<u32, Vec<Event>>,
}

/// Half-open datetime range [first of month, first of next month).
/// Rejects a month outside 1..=12 instead of guessing.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("invalid year/month {year}-{month}")))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("invalid year/month {year}-{month}")))?;

    Ok((
        start.and_hms_opt(0, 0, 0).unwrap(),
        end.and_hms_opt(0, 0, 0).unwrap(),
    ))
}

pub fn month_view(year: i32, month: u32, events: Vec<Event>) -> Result<MonthView, AppError> {
    let (start, end) = month_bounds(year, month)?;
    let first_day = start.date();
    let days_in_month = end.date().pred_opt().unwrap().day();

    // Buckets for days 1..=31 regardless of the month's actual length; the
    // grid, not the buckets, decides which days get rendered.
    let mut events_by_day: BTreeMap<u32, Vec<Event>> =
        (1..=31).map(|day| (day, Vec::new())).collect();
    for event in events {
        if let Some(bucket) = events_by_day.get_mut(&event.event_date.day()) {
            bucket.push(event);
        }
    }

    let first_weekday = first_day.weekday().num_days_from_monday();

    let mut month_grid: Vec<(u32, u32)> = Vec::new();
    for weekday in 0..first_weekday {
        month_grid.push((0, weekday));
    }
    for day in 1..=days_in_month {
        month_grid.push((day, (first_weekday + day - 1) % 7));
    }
    let trailing = month_grid.len() % 7;
    if trailing != 0 {
        for weekday in trailing..7 {
            month_grid.push((0, weekday as u32));
        }
    }

    Ok(MonthView {
        year,
        month,
        month_name: MONTH_NAMES[(month - 1) as usize],
        month_grid,
        events_by_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_on(day: u32, title: &str) -> Event {
        let event_date = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Event {
            id: day as i64,
            title: title.to_string(),
            description: "d".to_string(),
            event_date,
            created_at: event_date,
        }
    }

    fn event_at(year: i32, month: u32, day: u32) -> Event {
        let event_date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Event {
            id: 1,
            title: "e".to_string(),
            description: "d".to_string(),
            event_date,
            created_at: event_date,
        }
    }

    #[test]
    fn march_2024_grid_is_weekday_aligned() {
        let view = month_view(2024, 3, Vec::new()).unwrap();

        assert_eq!(view.month_name, "March");
        // March 2024 starts on a Friday: four padding cells, then day 1
        assert_eq!(view.month_grid.len(), 35);
        assert_eq!(&view.month_grid[..5], &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 4)]);
        // ...and ends on a Sunday, so no trailing padding
        assert_eq!(view.month_grid[34], (31, 6));
    }

    #[test]
    fn leap_february_has_29_days_and_trailing_padding() {
        let view = month_view(2024, 2, Vec::new()).unwrap();

        let days: Vec<u32> = view
            .month_grid
            .iter()
            .map(|&(day, _)| day)
            .filter(|&day| day != 0)
            .collect();
        assert_eq!(days.len(), 29);
        assert_eq!(view.month_grid.len() % 7, 0);
        // Feb 1 2024 is a Thursday
        assert_eq!(view.month_grid[3], (1, 3));
        assert_eq!(view.month_grid[34], (0, 6));
    }

    #[test]
    fn events_land_in_their_day_bucket_in_supplied_order() {
        let events = vec![
            event_on(5, "Standup"),
            event_on(5, "Review"),
            event_on(12, "Planning"),
        ];
        let view = month_view(2024, 3, events).unwrap();

        let day5: Vec<&str> = view.events_by_day[&5]
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(day5, vec!["Standup", "Review"]);
        assert_eq!(view.events_by_day[&12].len(), 1);
        assert!(view.events_by_day[&1].is_empty());
    }

    #[test]
    fn day_31_bucket_exists_even_for_a_30_day_month() {
        // Pathological input: a day-31 event fed into April's view still
        // lands in bucket 31, while the grid itself has no day 31.
        let stray = event_at(2024, 3, 31);
        let view = month_view(2024, 4, vec![stray]).unwrap();

        assert_eq!(view.month_name, "April");
        assert_eq!(view.events_by_day[&31].len(), 1);
        assert!(view.month_grid.iter().all(|&(day, _)| day != 31));
    }

    #[test]
    fn all_31_buckets_are_always_present() {
        let view = month_view(2024, 2, Vec::new()).unwrap();

        assert_eq!(view.events_by_day.len(), 31);
        assert!((1..=31).all(|day| view.events_by_day.contains_key(&day)));
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert!(matches!(
            month_view(2024, 13, Vec::new()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            month_view(2024, 0, Vec::new()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn month_bounds_are_half_open() {
        let (start, end) = month_bounds(2024, 12).unwrap();

        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
