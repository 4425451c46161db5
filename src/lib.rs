pub mod args;
pub mod bond;
pub mod dates;
pub mod daycount;
pub mod error;

use bond::Bond;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use bond::{accrued_interest, Quote};
pub use dates::{derive_periods, last_coupon_date, Frequency, IssueDate};
pub use daycount::DayCount;
pub use error::BondError;

type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("error invalid arguments: {0}")]
    InvalidArguments(BondError),
    #[error("error when computing bond price: {0}")]
    Pricing(BondError),
}

/// Logs go to stderr so that stdout only carries the price.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn get_args() -> CliResult<args::BondCli> {
    let matches = args::BondCli::parse();
    Ok(matches)
}

pub fn run(cli: args::BondCli) -> CliResult<()> {
    let bond = Bond::new(&cli).map_err(CliError::InvalidArguments)?;
    let quote = bond.quote().map_err(CliError::Pricing)?;

    if cli.verbose {
        println!("{}\n{}", quote.cashflows_table(), quote.analysis_table());
    }
    println!("{:.2}{}", quote.price(), cli.currency);

    Ok(())
}
