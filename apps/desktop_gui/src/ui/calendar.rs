//! Month grid used by the expiration date picker.

use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
}

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl CalendarMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Empty cells before day 1 in a Sunday-first week.
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        next.signed_duration_since(self.first).num_days() as u32
    }

    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Row-major cells of the grid; `None` pads the first and last weeks.
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let mut cells = vec![None; self.leading_blanks()];
        cells.extend((0..self.days_in_month()).map(|offset| {
            self.first
                .checked_add_days(chrono::Days::new(offset as u64))
        }));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn leading_blanks_are_sunday_first() {
        // 2024-09-01 was a Sunday, 2024-02-01 a Thursday.
        assert_eq!(CalendarMonth::containing(date(2024, 9, 17)).leading_blanks(), 0);
        assert_eq!(CalendarMonth::containing(date(2024, 2, 10)).leading_blanks(), 4);
        // 2024-06-01 was a Saturday.
        assert_eq!(CalendarMonth::containing(date(2024, 6, 1)).leading_blanks(), 6);
    }

    #[test]
    fn day_counts_handle_leap_years_and_december() {
        assert_eq!(CalendarMonth::containing(date(2024, 2, 1)).days_in_month(), 29);
        assert_eq!(CalendarMonth::containing(date(2023, 2, 1)).days_in_month(), 28);
        assert_eq!(CalendarMonth::containing(date(2024, 12, 31)).days_in_month(), 31);
        assert_eq!(CalendarMonth::containing(date(2024, 4, 5)).days_in_month(), 30);
    }

    #[test]
    fn month_stepping_crosses_year_boundaries() {
        let dec = CalendarMonth::containing(date(2024, 12, 25));
        assert_eq!(dec.next(), CalendarMonth::containing(date(2025, 1, 1)));
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(dec.title(), "December 2024");
    }

    #[test]
    fn cells_fill_whole_weeks() {
        let feb = CalendarMonth::containing(date(2024, 2, 1));
        let cells = feb.cells();
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells[..4], [None, None, None, None]);
        assert_eq!(cells[4], Some(date(2024, 2, 1)));
        assert_eq!(cells.iter().flatten().count(), 29);
        assert_eq!(cells.iter().flatten().last(), Some(&date(2024, 2, 29)));
    }
}
