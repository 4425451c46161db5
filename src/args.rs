use clap::Parser;

/// Prices a fixed-coupon bond from its coupon, yield and term.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct BondCli {
    /// Number of periods until maturity (derived from the dates when omitted)
    #[arg(short = 'n', long)]
    pub periods: Option<u32>,

    /// Coupon rate as a decimal, e.g. 0.05 for 5%
    #[arg(short = 'c', long = "coupon-rate")]
    pub coupon_rate: Option<f64>,

    /// Coupon paid every period
    #[arg(short = 'C', long = "coupon-payment")]
    pub coupon_payment: Option<f64>,

    /// Yield to maturity as a decimal, e.g. 0.03 for 3%
    #[arg(short = 'y', long = "yield")]
    pub yield_rate: Option<f64>,

    /// Face value of the bond, typically 1000
    #[arg(short = 'F', long = "face-value")]
    pub face_value: Option<f64>,

    /// Issue date as YYYY-MM-DD, or "now" / "today"
    #[arg(short = 'i', long = "issue-date")]
    pub issue_date: Option<String>,

    /// Maturity date as YYYY-MM-DD
    #[arg(short = 'm', long = "maturity-date")]
    pub maturity_date: Option<String>,

    /// Payments per year: 1 annual, 2 semiannual, 4 quarterly, 12 monthly
    #[arg(short = 'f', long, default_value_t = 2)]
    pub frequency: u32,

    /// Settlement date as YYYY-MM-DD, required for the dirty price
    #[arg(short = 's', long = "settlement-date")]
    pub settlement_date: Option<String>,

    /// Day-count convention: 30/360, Actual/Actual or Actual/360
    #[arg(short = 'd', long = "day-count-convention", default_value = "30/360")]
    pub day_count_convention: String,

    /// Add accrued interest to get the dirty price
    #[arg(short = 'D', long = "dirty-price", action(clap::ArgAction::SetTrue))]
    pub dirty_price: bool,

    /// Print the cash flow and pricing breakdown tables
    #[arg(short = 'v', long, action(clap::ArgAction::SetTrue))]
    pub verbose: bool,

    #[arg(long, default_value = "$")]
    pub currency: String,
}
