use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondError {
    #[error("{0} is required to compute the bond price")]
    MissingRequiredField(&'static str),
    #[error("{0}")]
    ConflictingFields(&'static str),
    #[error("{0}")]
    IncompleteDateRange(&'static str),
    #[error("invalid {field} date [ {value} ]; expected YYYY-MM-DD")]
    InvalidDateFormat { field: &'static str, value: String },
    #[error("maturity date {maturity} must be after issue date {issue}")]
    InvalidDateOrder { issue: NaiveDate, maturity: NaiveDate },
    #[error("settlement date {settlement} is before the last coupon date {last_coupon}")]
    SettlementBeforeLastCoupon {
        settlement: NaiveDate,
        last_coupon: NaiveDate,
    },
    #[error(
        "unsupported day-count convention [ {0} ]. Has to be one of: 30/360, Actual/Actual, Actual/360."
    )]
    UnsupportedDayCountConvention(String),
    #[error(
        "invalid payment frequency [ {0} ]. Has to be a positive number of payments per year, at most 12 for coupon dates."
    )]
    InvalidFrequency(u32),
}
