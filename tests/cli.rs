use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

const PRG: &str = "bond-pricer";

const TEN_YEAR: [&str; 10] = [
    "-c",
    "0.05",
    "-y",
    "0.04",
    "-F",
    "1000",
    "-i",
    "2020-01-01",
    "-m",
    "2030-01-01",
];

#[test]
fn test_clean_price() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .assert()
        .success()
        .stdout("1081.76$\n");

    Ok(())
}

#[test]
fn test_dirty_price() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .args(["--dirty-price", "--settlement-date", "2024-12-01"])
        .assert()
        .success()
        .stdout("1103.01$\n");

    Ok(())
}

#[test]
fn test_dirty_price_actual_actual() -> TestResult {
    // 1081.7572 clean + 25 * 153/184 = 1102.5452
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .args(["-D", "-s", "2024-12-01", "-d", "Actual/Actual"])
        .assert()
        .success()
        .stdout("1102.55$\n");

    Ok(())
}

#[test]
fn test_explicit_periods_and_currency() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(["-n", "20", "-C", "25", "-y", "0.04", "-F", "1000", "--currency", "€"])
        .assert()
        .success()
        .stdout("1081.76€\n");

    Ok(())
}

#[test]
fn test_weekly_clean_price() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .args(["-f", "52"])
        .assert()
        .success()
        .stdout("1082.39$\n");

    Ok(())
}

#[test]
fn test_verbose_tables() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(["-n", "2", "-c", "0.05", "-y", "0.04", "-F", "1000", "-v"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("| Discount factor |")
                .and(predicate::str::contains("1025.00"))
                .and(predicate::str::contains("| Clean price "))
                .and(predicate::str::ends_with("1009.71$\n")),
        );

    Ok(())
}

#[test]
fn test_conflicting_coupons() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .args(["-C", "25"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error invalid arguments: please specify only one of --coupon-rate or --coupon-payment",
        ));

    Ok(())
}

#[test]
fn test_missing_settlement_for_dirty_price() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .arg("--dirty-price")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error invalid arguments: a settlement date for the dirty price is required",
        ));

    Ok(())
}

#[test]
fn test_maturity_before_issue() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(["-c", "0.05", "-y", "0.04", "-F", "1000"])
        .args(["-i", "2030-01-01", "-m", "2020-01-01"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error when computing bond price: maturity date 2020-01-01 must be after issue date 2030-01-01",
        ));

    Ok(())
}

#[test]
fn test_unsupported_day_count() -> TestResult {
    Command::cargo_bin(PRG)?
        .args(TEN_YEAR)
        .args(["-D", "-s", "2024-12-01", "-d", "act/365"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "unsupported day-count convention [ act/365 ]",
        ));

    Ok(())
}

#[test]
fn test_zero_periods_warns() -> TestResult {
    Command::cargo_bin(PRG)?
        .env_remove("RUST_LOG")
        .args(["-c", "0.05", "-y", "0.04", "-F", "1000"])
        .args(["-i", "2024-06-01", "-m", "2025-01-01"])
        .assert()
        .success()
        .stdout("1000.00$\n")
        .stderr(predicate::str::contains("prices at face value"));

    Ok(())
}
