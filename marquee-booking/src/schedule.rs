use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Days offered for booking, counted from today inclusive.
pub const BOOKING_WINDOW_DAYS: u64 = 7;

/// One selectable day, with the fields the date picker renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowDate {
    pub value: NaiveDate,
    pub weekday: String,
    pub day: u32,
    pub month: String,
}

impl ShowDate {
    fn from_date(value: NaiveDate) -> Self {
        Self {
            value,
            weekday: value.format("%a").to_string(),
            day: value.day(),
            month: value.format("%b").to_string(),
        }
    }
}

/// The selectable window of consecutive calendar days starting today.
#[derive(Debug, Clone)]
pub struct BookingSchedule {
    dates: Vec<ShowDate>,
}

impl BookingSchedule {
    pub fn upcoming(today: NaiveDate) -> Self {
        Self::window(today, BOOKING_WINDOW_DAYS)
    }

    pub fn window(today: NaiveDate, days: u64) -> Self {
        let dates = (0..days)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(ShowDate::from_date)
            .collect();
        Self { dates }
    }

    pub fn dates(&self) -> &[ShowDate] {
        &self.dates
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.iter().any(|d| d.value == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_window_spans_seven_consecutive_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let schedule = BookingSchedule::upcoming(today);

        assert_eq!(schedule.dates().len(), 7);
        assert_eq!(schedule.dates()[0].value, today);
        assert_eq!(
            schedule.dates()[6].value,
            NaiveDate::from_ymd_opt(2026, 8, 13).unwrap()
        );

        assert!(schedule.contains(today));
        assert!(!schedule.contains(NaiveDate::from_ymd_opt(2026, 8, 14).unwrap()));
    }

    #[test]
    fn display_fields_match_the_calendar() {
        // 2026-08-07 is a Friday
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let schedule = BookingSchedule::upcoming(today);

        let first = &schedule.dates()[0];
        assert_eq!(first.weekday, "Fri");
        assert_eq!(first.day, 7);
        assert_eq!(first.month, "Aug");
    }

    #[test]
    fn the_window_length_is_configurable() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(BookingSchedule::window(today, 3).dates().len(), 3);
    }
}
