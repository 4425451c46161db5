use chrono::NaiveDate;
use tabled::{builder::Builder, Table};
use tracing::{debug, warn};

use crate::args;
use crate::dates::{self, Clock, Frequency, IssueDate, SystemClock};
use crate::daycount::DayCount;
use crate::error::BondError;

const BOTH_COUPONS: &str = "please specify only one of --coupon-rate or --coupon-payment";
const NO_COUPON: &str = "a coupon of sorts, rate or payment, needs to be specified";
const NO_TERM: &str =
    "either the number of periods (--periods) or both --issue-date and --maturity-date are required";
const HALF_TERM: &str =
    "both --issue-date and --maturity-date must be provided together if --periods is not specified";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coupon {
    /// Annual rate as a fraction of face value.
    Rate(f64),
    /// Fixed amount paid every period.
    Payment(f64),
}

impl Coupon {
    pub fn payment(&self, face_value: f64, frequency: Frequency) -> f64 {
        match *self {
            Coupon::Rate(rate) => face_value * rate / f64::from(frequency.get()),
            Coupon::Payment(payment) => payment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Periods(u32),
    Dated {
        issue: IssueDate,
        maturity: NaiveDate,
    },
}

/// Inputs for accrued interest, present only when the dirty price is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    pub settlement: NaiveDate,
    pub issue: IssueDate,
    pub day_count: DayCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub coupon: Coupon,
    pub yield_rate: f64,
    pub face_value: f64,
    pub frequency: Frequency,
    pub term: Term,
    pub accrual: Option<Accrual>,
}

impl Bond {
    /// Validates the command line flags into an unambiguous bond description.
    pub fn new(cli: &args::BondCli) -> Result<Self, BondError> {
        let yield_rate = cli
            .yield_rate
            .filter(|y| *y != 0.0)
            .ok_or(BondError::MissingRequiredField("a non-zero yield value"))?;

        let face_value = cli
            .face_value
            .filter(|f| *f != 0.0)
            .ok_or(BondError::MissingRequiredField("a non-zero face value"))?;

        let coupon = match (cli.coupon_rate, cli.coupon_payment) {
            (Some(_), Some(_)) => return Err(BondError::ConflictingFields(BOTH_COUPONS)),
            (Some(rate), None) => Coupon::Rate(rate),
            (None, Some(payment)) => Coupon::Payment(payment),
            (None, None) => return Err(BondError::ConflictingFields(NO_COUPON)),
        };

        let settlement = match (cli.dirty_price, cli.settlement_date.as_deref()) {
            (true, None) => {
                return Err(BondError::MissingRequiredField(
                    "a settlement date for the dirty price",
                ))
            }
            (true, Some(settlement)) => Some(settlement),
            (false, _) => None,
        };

        let periods = cli.periods.filter(|n| *n > 0);
        if periods.is_none() {
            match (cli.issue_date.is_some(), cli.maturity_date.is_some()) {
                (false, false) => return Err(BondError::IncompleteDateRange(NO_TERM)),
                (true, false) | (false, true) => {
                    return Err(BondError::IncompleteDateRange(HALF_TERM))
                }
                (true, true) => {}
            }
        }

        let frequency = Frequency::new(cli.frequency)?;

        let issue = cli
            .issue_date
            .as_deref()
            .map(str::parse::<IssueDate>)
            .transpose()?;

        let term = match (periods, issue, cli.maturity_date.as_deref()) {
            (Some(count), _, _) => Term::Periods(count),
            (None, Some(issue), Some(maturity)) => Term::Dated {
                issue,
                maturity: dates::parse_date("maturity", maturity)?,
            },
            _ => return Err(BondError::IncompleteDateRange(HALF_TERM)),
        };

        let accrual = match settlement {
            Some(settlement) => Some(Accrual {
                settlement: dates::parse_date("settlement", settlement)?,
                issue: issue.ok_or(BondError::MissingRequiredField(
                    "an issue date for the dirty price",
                ))?,
                day_count: cli.day_count_convention.parse()?,
            }),
            None => None,
        };

        Ok(Self {
            coupon,
            yield_rate,
            face_value,
            frequency,
            term,
            accrual,
        })
    }

    pub fn quote(&self) -> Result<Quote, BondError> {
        self.quote_with(&SystemClock)
    }

    pub fn quote_with(&self, clock: &impl Clock) -> Result<Quote, BondError> {
        let periods = match self.term {
            Term::Periods(count) => count,
            Term::Dated { issue, maturity } => {
                dates::periods_between(issue.resolve(clock), maturity, self.frequency)?
            }
        };
        if periods == 0 {
            warn!("no whole coupon period before maturity, the bond prices at face value");
        }

        let coupon_payment = self.coupon.payment(self.face_value, self.frequency);
        let periodic_yield = self.yield_rate / f64::from(self.frequency.get());
        let clean_price = present_value(periods, coupon_payment, periodic_yield, self.face_value);

        let accrued_interest = match self.accrual {
            Some(accrual) => Some(accrued_interest_between(
                accrual.settlement,
                accrual.issue.resolve(clock),
                self.frequency,
                coupon_payment,
                accrual.day_count,
            )?),
            None => None,
        };

        debug!(
            periods,
            coupon_payment, periodic_yield, clean_price, ?accrued_interest, "priced bond"
        );

        Ok(Quote {
            periods,
            coupon_payment,
            periodic_yield,
            face_value: self.face_value,
            clean_price,
            accrued_interest,
        })
    }

    /// Clean price, or dirty price when accrual inputs are present.
    pub fn price(&self) -> Result<f64, BondError> {
        self.quote().map(|quote| quote.price())
    }
}

/// Discounted value of `periods` coupons of `coupon` plus the face value
/// redeemed with the last one.
pub fn present_value(periods: u32, coupon: f64, rate: f64, face_value: f64) -> f64 {
    let discount = |i: u32| (1.0 + rate).powf(f64::from(i));
    let coupons: f64 = (1..=periods).map(|i| coupon / discount(i)).sum();
    coupons + face_value / discount(periods)
}

/// Interest accrued between the last coupon date and `settlement`.
pub fn accrued_interest_between(
    settlement: NaiveDate,
    issue: NaiveDate,
    frequency: Frequency,
    coupon_payment: f64,
    day_count: DayCount,
) -> Result<f64, BondError> {
    let (last_coupon, next_coupon) = dates::coupon_period(issue, settlement, frequency)?;
    if settlement < last_coupon {
        return Err(BondError::SettlementBeforeLastCoupon {
            settlement,
            last_coupon,
        });
    }

    let days_between = (settlement - last_coupon).num_days() as f64;
    let days_in_period = day_count.days_in_period(last_coupon, next_coupon, frequency);
    let accrued = days_between / days_in_period * coupon_payment;

    debug!(%last_coupon, %next_coupon, days_between, days_in_period, %day_count, accrued, "accrued interest");
    Ok(accrued)
}

/// Accrued interest from raw inputs. Only the issue date accepts `now` or `today`.
pub fn accrued_interest(
    settlement_date: &str,
    issue_date: &str,
    frequency: u32,
    coupon_payment: f64,
    day_count: &str,
) -> Result<f64, BondError> {
    let settlement = dates::parse_date("settlement", settlement_date)?;
    let issue = issue_date.parse::<IssueDate>()?.resolve(&SystemClock);
    accrued_interest_between(
        settlement,
        issue,
        Frequency::new(frequency)?,
        coupon_payment,
        day_count.parse()?,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub periods: u32,
    pub coupon_payment: f64,
    pub periodic_yield: f64,
    pub face_value: f64,
    pub clean_price: f64,
    pub accrued_interest: Option<f64>,
}

impl Quote {
    pub fn price(&self) -> f64 {
        self.clean_price + self.accrued_interest.unwrap_or(0.0)
    }

    /// (period, cash flow, discount factor) for every payment.
    fn cashflows(&self) -> impl Iterator<Item = (u32, f64, f64)> + '_ {
        (1..=self.periods).map(move |i| {
            let cashflow = if i == self.periods {
                self.coupon_payment + self.face_value
            } else {
                self.coupon_payment
            };
            (i, cashflow, (1.0 + self.periodic_yield).powf(-f64::from(i)))
        })
    }

    pub fn analysis_table(&self) -> Table {
        let accrued = self
            .accrued_interest
            .map_or_else(|| "-".to_string(), to_2dp_string);

        let mut builder = Builder::default();
        builder
            .set_header(["Metric", "Result"])
            .push_record(["Periods".to_string(), self.periods.to_string()])
            .push_record(["Coupon payment".to_string(), to_2dp_string(self.coupon_payment)])
            .push_record([
                "Periodic yield".to_string(),
                format!("{:.4}%", self.periodic_yield * 100.0),
            ])
            .push_record(["Clean price".to_string(), to_2dp_string(self.clean_price)])
            .push_record(["Accrued interest".to_string(), accrued]);
        if self.accrued_interest.is_some() {
            builder.push_record(["Dirty price".to_string(), to_2dp_string(self.price())]);
        }

        builder.build()
    }

    pub fn cashflows_table(&self) -> Table {
        let mut builder = Builder::default();
        builder.set_header(["Period", "Cash flow", "Discount factor", "Present value"]);
        for (i, cf, df) in self.cashflows() {
            builder.push_record([
                i.to_string(),
                to_2dp_string(cf),
                format!("{:.6}", df),
                to_2dp_string(cf * df),
            ]);
        }

        builder.build()
    }
}

fn to_2dp_string(x: f64) -> String {
    format!("{:.2}", x)
}
