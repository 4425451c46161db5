use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::dates::Frequency;
use crate::error::BondError;

/// Rule turning elapsed calendar days into a fraction of a coupon period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayCount {
    #[default]
    Thirty360,
    ActualActual,
    Actual360,
}

impl DayCount {
    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Thirty360 => "30/360",
            DayCount::ActualActual => "Actual/Actual",
            DayCount::Actual360 => "Actual/360",
        }
    }

    /// Length in days of the coupon period running from `start` to `end`.
    ///
    /// Only `Actual/Actual` looks at the calendar; both 360-day conventions use a
    /// fixed `360 / frequency` period.
    pub fn days_in_period(&self, start: NaiveDate, end: NaiveDate, frequency: Frequency) -> f64 {
        match self {
            DayCount::Thirty360 | DayCount::Actual360 => 360.0 / f64::from(frequency.get()),
            DayCount::ActualActual => (end - start).num_days() as f64,
        }
    }
}

impl FromStr for DayCount {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30/360" => Ok(DayCount::Thirty360),
            "Actual/Actual" => Ok(DayCount::ActualActual),
            "Actual/360" => Ok(DayCount::Actual360),
            other => Err(BondError::UnsupportedDayCountConvention(other.to_string())),
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_supported_conventions() {
        for dc in [DayCount::Thirty360, DayCount::ActualActual, DayCount::Actual360] {
            assert_eq!(dc.name().parse::<DayCount>().unwrap(), dc);
        }
    }

    #[test]
    fn rejects_unknown_convention() {
        assert_eq!(
            "act/365".parse::<DayCount>(),
            Err(BondError::UnsupportedDayCountConvention("act/365".to_string()))
        );
    }

    #[test]
    fn fixed_period_length_ignores_calendar() {
        let semi = Frequency::new(2).unwrap();
        let (start, end) = (date(2024, 7, 1), date(2025, 1, 1));
        assert_eq!(DayCount::Thirty360.days_in_period(start, end, semi), 180.0);
        assert_eq!(DayCount::Actual360.days_in_period(start, end, semi), 180.0);
    }

    #[test]
    fn actual_actual_counts_calendar_days() {
        let semi = Frequency::new(2).unwrap();
        // Jul 31 + Aug 31 + Sep 30 + Oct 31 + Nov 30 + Dec 31
        let days = DayCount::ActualActual.days_in_period(date(2024, 7, 1), date(2025, 1, 1), semi);
        assert_eq!(days, 184.0);
        // 2024 is a leap year: Jan 31 + Feb 29 + Mar 31 + Apr 30 + May 31 + Jun 30
        let days = DayCount::ActualActual.days_in_period(date(2024, 1, 1), date(2024, 7, 1), semi);
        assert_eq!(days, 182.0);
    }
}
