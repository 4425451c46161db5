use chrono::{Datelike, Months, NaiveDate, Utc};
use std::str::FromStr;
use tracing::debug;

use crate::error::BondError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current date, read when an issue date is given as `now` or `today`.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Parses a strict `YYYY-MM-DD` date. `field` names the date in the error.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, BondError> {
    let bad_format = || BondError::InvalidDateFormat {
        field,
        value: value.to_string(),
    };

    // chrono accepts unpadded months and days, the format here does not
    if value.len() != 10 {
        return Err(bad_format());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| bad_format())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueDate {
    Fixed(NaiveDate),
    CurrentDate,
}

impl IssueDate {
    pub fn resolve(&self, clock: &impl Clock) -> NaiveDate {
        match self {
            IssueDate::Fixed(date) => *date,
            IssueDate::CurrentDate => clock.today(),
        }
    }
}

impl FromStr for IssueDate {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now" | "today" => Ok(IssueDate::CurrentDate),
            _ => parse_date("issue", s).map(IssueDate::Fixed),
        }
    }
}

/// Number of coupon payments per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency(u32);

impl Frequency {
    pub fn new(payments_per_year: u32) -> Result<Self, BondError> {
        if payments_per_year > 0 {
            Ok(Self(payments_per_year))
        } else {
            Err(BondError::InvalidFrequency(payments_per_year))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whole months between coupon dates. Fails above 12 payments a year,
    /// where a period is shorter than a month.
    pub fn months_per_period(self) -> Result<u32, BondError> {
        match 12 / self.0 {
            0 => Err(BondError::InvalidFrequency(self.0)),
            months => Ok(months),
        }
    }
}

/// Whole coupon periods between `issue` and `maturity`.
///
/// Counts elapsed whole years, dropping the last one when the maturity's day of
/// year comes before the issue's, then scales by the frequency. Fractional
/// years are never counted.
pub fn periods_between(
    issue: NaiveDate,
    maturity: NaiveDate,
    frequency: Frequency,
) -> Result<u32, BondError> {
    if maturity <= issue {
        return Err(BondError::InvalidDateOrder { issue, maturity });
    }

    let mut years = maturity.year() - issue.year();
    if maturity.ordinal() < issue.ordinal() {
        years -= 1;
    }
    let years = u32::try_from(years).map_err(|_| BondError::InvalidDateOrder { issue, maturity })?;

    let periods = years * frequency.get();
    debug!(%issue, %maturity, years, periods, "derived coupon periods");
    Ok(periods)
}

/// Derives the period count from raw date strings; the issue date may be `now` or `today`.
pub fn derive_periods(
    issue_date: &str,
    maturity_date: &str,
    frequency: u32,
) -> Result<u32, BondError> {
    let issue = issue_date.parse::<IssueDate>()?.resolve(&SystemClock);
    let maturity = parse_date("maturity", maturity_date)?;
    periods_between(issue, maturity, Frequency::new(frequency)?)
}

/// Latest coupon date strictly before `settlement`, or `issue` when no coupon
/// has fallen yet.
pub fn last_coupon_date(
    issue: NaiveDate,
    settlement: NaiveDate,
    frequency: Frequency,
) -> Result<NaiveDate, BondError> {
    coupon_period(issue, settlement, frequency).map(|(last, _)| last)
}

/// The coupon period containing `settlement`: the last coupon date and that
/// date advanced by one period.
///
/// Coupon dates are anchored on `issue` so that month-end clamping (Jan 31 -> Feb 29)
/// does not carry into later coupons.
pub(crate) fn coupon_period(
    issue: NaiveDate,
    settlement: NaiveDate,
    frequency: Frequency,
) -> Result<(NaiveDate, NaiveDate), BondError> {
    let step = frequency.months_per_period()?;
    let advance = |from: NaiveDate, months: u32| from.checked_add_months(Months::new(months));

    let mut last = issue;
    for k in 1u32.. {
        match k.checked_mul(step).and_then(|months| advance(issue, months)) {
            Some(next) if next < settlement => last = next,
            _ => break,
        }
    }

    let next = advance(last, step).unwrap_or(NaiveDate::MAX);
    debug!(%last, %next, %settlement, "located coupon period");
    Ok((last, next))
}
