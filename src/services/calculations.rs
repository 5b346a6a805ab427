// src/services/calculations.rs
use std::fmt;
use log::{debug, warn};
use crate::models::{CalculationInput, CalculationResult, MonthlyRow};

#[derive(Debug, Clone, PartialEq)]
pub enum CalculationError {
    NonPositiveStockPrice(f64),
    ZeroDividendFrequency,
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalculationError::NonPositiveStockPrice(price) => {
                write!(f, "Stock price must be positive, got {}", price)
            }
            CalculationError::ZeroDividendFrequency => {
                write!(f, "Dividend frequency must be at least 1 payment per year")
            }
        }
    }
}

impl std::error::Error for CalculationError {}

fn check_divisors(input: &CalculationInput) -> Result<(), CalculationError> {
    // NaN fails the comparison, so it is rejected along with zero and negatives
    if !(input.stock_price > 0.0) {
        warn!("Skipping calculation: stock price {} is not positive", input.stock_price);
        return Err(CalculationError::NonPositiveStockPrice(input.stock_price));
    }
    if input.dividend_frequency == 0 {
        warn!("Skipping calculation: dividend frequency is zero");
        return Err(CalculationError::ZeroDividendFrequency);
    }
    Ok(())
}

fn future_value(amount: f64, monthly_rate: f64, periods: u64) -> f64 {
    amount * (1.0 + monthly_rate).powf(periods as f64)
}

/// Whether a dividend falls due in `month`.
///
/// The period is `12 / frequency` months as a real number, so frequencies that do
/// not divide 12 trigger irregularly or never (5 and 7 never pay, 8 pays every
/// third month).
fn is_dividend_month(month: u64, months_per_dividend: f64) -> bool {
    months_per_dividend > 0.0 && (month as f64) % months_per_dividend == 0.0
}

/// Lazily yields one [`MonthlyRow`] per month of the horizon.
///
/// A contribution made in `month` compounds for `total_months - month` periods, so
/// the last contribution does not grow and the first grows for one month less than
/// the full horizon. Dividends use the share count including the current month's
/// purchase.
#[derive(Debug, Clone)]
pub struct ScheduleRows {
    monthly_investment: f64,
    monthly_rate: f64,
    dividend_per_share: f64,
    months_per_dividend: f64,
    shares_per_month: f64,
    total_months: u64,
    month: u64,
    shares: f64,
}

impl Iterator for ScheduleRows {
    type Item = MonthlyRow;

    fn next(&mut self) -> Option<MonthlyRow> {
        if self.month >= self.total_months {
            return None;
        }
        self.month += 1;
        self.shares += self.shares_per_month;
        let months_remaining = self.total_months - self.month;

        // Non-dividend months contribute nothing, not 0 * (1 + r)^n
        let (dividend_paid, dividend_future_value) = if is_dividend_month(self.month, self.months_per_dividend) {
            let paid = self.shares * self.dividend_per_share;
            (paid, future_value(paid, self.monthly_rate, months_remaining))
        } else {
            (0.0, 0.0)
        };

        Some(MonthlyRow {
            month: self.month,
            shares_held: self.shares,
            months_remaining,
            contribution_future_value: future_value(self.monthly_investment, self.monthly_rate, months_remaining),
            dividend_paid,
            dividend_future_value,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.total_months - self.month).ok();
        (left.unwrap_or(usize::MAX), left)
    }
}

pub fn schedule_rows(input: &CalculationInput) -> Result<ScheduleRows, CalculationError> {
    check_divisors(input)?;

    let frequency = input.dividend_frequency as f64;
    Ok(ScheduleRows {
        monthly_investment: input.monthly_investment,
        monthly_rate: input.interest_rate / 100.0 / 12.0,
        dividend_per_share: (input.stock_price * (input.dividend_rate / 100.0)) / frequency,
        months_per_dividend: 12.0 / frequency,
        shares_per_month: input.monthly_investment / input.stock_price,
        total_months: input.total_months(),
        month: 0,
        shares: 0.0,
    })
}

/// The whole schedule in memory. Prefer [`schedule_rows`] for long horizons.
pub fn monthly_schedule(input: &CalculationInput) -> Result<Vec<MonthlyRow>, CalculationError> {
    let rows: Vec<MonthlyRow> = schedule_rows(input)?.collect();
    debug!("Simulated {} months for {:?}", rows.len(), input);
    Ok(rows)
}

/// Future value of the contributions and of the dividends they would have paid,
/// had both been deposited at `interest_rate` instead.
pub fn calculate_opportunity_cost(input: &CalculationInput) -> Result<CalculationResult, CalculationError> {
    let mut result = schedule_rows(input)?.fold(CalculationResult::default(), |mut acc, row| {
        acc.total_shares = row.shares_held;
        acc.future_value_of_capital += row.contribution_future_value;
        acc.total_dividends += row.dividend_paid;
        acc.future_value_of_dividends += row.dividend_future_value;
        acc
    });
    result.total_opportunity_cost = result.future_value_of_capital + result.future_value_of_dividends;

    debug!("Calculated opportunity cost: {:?}", result);
    Ok(result)
}

/// Months on which a dividend is paid over the horizon.
pub fn dividend_months(input: &CalculationInput) -> Result<Vec<u64>, CalculationError> {
    check_divisors(input)?;
    let months_per_dividend = 12.0 / input.dividend_frequency as f64;
    Ok((1..=input.total_months())
        .filter(|&month| is_dividend_month(month, months_per_dividend))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(monthly_investment: f64, stock_price: f64, dividend_rate: f64, dividend_frequency: u32, years: u32, interest_rate: f64) -> CalculationInput {
        CalculationInput { monthly_investment, stock_price, dividend_rate, dividend_frequency, years, interest_rate }
    }

    fn assert_close(actual: f64, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            ((actual - expected) / scale).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn zero_investment_yields_all_zero() {
        let result = calculate_opportunity_cost(&input(0.0, 68_000.0, 8.0, 2, 30, 7.0)).unwrap();
        assert_eq!(result, CalculationResult::default());
    }

    #[test]
    fn zero_interest_means_no_growth() {
        let plan = input(1_000.0, 100.0, 12.0, 4, 10, 0.0);
        let result = calculate_opportunity_cost(&plan).unwrap();
        assert_eq!(result.future_value_of_capital, 1_000.0 * 120.0);
        assert_eq!(result.future_value_of_dividends, result.total_dividends);
    }

    #[test]
    fn share_count_ignores_dividend_and_interest() {
        let a = calculate_opportunity_cost(&input(1_000.0, 100.0, 0.0, 1, 5, 0.0)).unwrap();
        let b = calculate_opportunity_cost(&input(1_000.0, 100.0, 30.0, 12, 5, 15.0)).unwrap();
        assert_eq!(a.total_shares, 600.0);
        assert_eq!(a.total_shares, b.total_shares);

        let odd = calculate_opportunity_cost(&input(1_000_000.0, 68_000.0, 8.0, 2, 30, 7.0)).unwrap();
        assert_close(odd.total_shares, 1_000_000.0 * 360.0 / 68_000.0);
    }

    #[test]
    fn total_is_sum_of_parts() {
        for rate in [0.0, 3.5, 7.0, 20.0] {
            let result = calculate_opportunity_cost(&input(250_000.0, 41_500.0, 6.5, 3, 17, rate)).unwrap();
            assert_eq!(
                result.total_opportunity_cost,
                result.future_value_of_capital + result.future_value_of_dividends
            );
        }
    }

    #[test]
    fn higher_interest_never_lowers_future_values() {
        let mut previous = calculate_opportunity_cost(&input(500_000.0, 50_000.0, 5.0, 4, 20, 0.0)).unwrap();
        for step in 1..=40 {
            let rate = step as f64 * 0.5;
            let current = calculate_opportunity_cost(&input(500_000.0, 50_000.0, 5.0, 4, 20, rate)).unwrap();
            assert!(current.future_value_of_capital >= previous.future_value_of_capital);
            assert!(current.future_value_of_dividends >= previous.future_value_of_dividends);
            previous = current;
        }
    }

    #[test]
    fn rejects_zero_divisors() {
        assert_eq!(
            calculate_opportunity_cost(&input(1_000.0, 0.0, 8.0, 2, 30, 7.0)),
            Err(CalculationError::NonPositiveStockPrice(0.0))
        );
        assert_eq!(
            calculate_opportunity_cost(&input(1_000.0, 68_000.0, 8.0, 0, 30, 7.0)),
            Err(CalculationError::ZeroDividendFrequency)
        );
        assert!(calculate_opportunity_cost(&input(1_000.0, -5.0, 8.0, 2, 30, 7.0)).is_err());
        assert!(calculate_opportunity_cost(&input(1_000.0, f64::NAN, 8.0, 2, 30, 7.0)).is_err());
    }

    #[test]
    fn negative_rates_are_accepted() {
        let result = calculate_opportunity_cost(&input(1_000.0, 100.0, -4.0, 2, 3, -2.0)).unwrap();
        assert!(result.total_dividends < 0.0);
        assert!(result.future_value_of_capital < 36_000.0);
        assert!(result.total_opportunity_cost.is_finite());
    }

    #[test]
    fn monthly_dividends_use_running_share_count() {
        let plan = input(1_000.0, 100.0, 12.0, 12, 1, 0.0);
        let rows = monthly_schedule(&plan).unwrap();
        let paid: Vec<f64> = rows.iter().map(|r| r.dividend_paid).collect();
        // 10 shares per month, 1.0 per share per payment
        let expected: Vec<f64> = (1..=12).map(|m| 10.0 * m as f64).collect();
        assert_eq!(paid, expected);
        assert_eq!(dividend_months(&plan).unwrap(), (1..=12).collect::<Vec<u64>>());

        let result = calculate_opportunity_cost(&plan).unwrap();
        assert_eq!(result.total_dividends, 780.0);
        assert_eq!(result.total_opportunity_cost, 12_780.0);
    }

    #[test]
    fn last_contribution_does_not_compound() {
        let plan = input(1_000.0, 100.0, 0.0, 1, 2, 12.0);
        let rows = monthly_schedule(&plan).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(last.months_remaining, 0);
        assert_eq!(last.contribution_future_value, 1_000.0);
        assert_close(rows[0].contribution_future_value, 1_000.0 * 1.01f64.powi(23));
    }

    #[test]
    fn frequencies_that_do_not_divide_twelve() {
        // 12 / 5 and 12 / 7 are not representable, the modulus never hits zero
        for frequency in [5, 7] {
            let plan = input(1_000.0, 100.0, 12.0, frequency, 2, 6.0);
            assert!(dividend_months(&plan).unwrap().is_empty());
            let result = calculate_opportunity_cost(&plan).unwrap();
            assert_eq!(result.total_dividends, 0.0);
            assert_eq!(result.future_value_of_dividends, 0.0);
        }

        // 12 / 8 = 1.5 is exact, so payments land every third month
        let plan = input(1_000.0, 100.0, 12.0, 8, 1, 6.0);
        assert_eq!(dividend_months(&plan).unwrap(), vec![3, 6, 9, 12]);
    }

    #[test]
    fn zero_years_is_empty() {
        let result = calculate_opportunity_cost(&input(1_000.0, 100.0, 5.0, 2, 0, 5.0)).unwrap();
        assert_eq!(result, CalculationResult::default());
    }

    #[test]
    fn extreme_interest_overflows_to_infinity() {
        let plan = CalculationInput { interest_rate: 50_000.0, ..CalculationInput::default() };
        let result = calculate_opportunity_cost(&plan).unwrap();
        assert_eq!(result.future_value_of_capital, f64::INFINITY);
        assert_eq!(result.future_value_of_dividends, f64::INFINITY);
        assert_eq!(result.total_opportunity_cost, f64::INFINITY);
        assert!(result.total_dividends.is_finite());

        let rows = monthly_schedule(&plan).unwrap();
        assert_eq!(rows[0].dividend_future_value, 0.0);
        assert_eq!(rows[5].dividend_future_value, f64::INFINITY);
    }

    #[test]
    fn schedule_rows_are_produced_lazily() {
        let plan = CalculationInput { years: u32::MAX, ..CalculationInput::default() };
        let mut rows = schedule_rows(&plan).unwrap();
        let first: Vec<u64> = rows.by_ref().take(3).map(|r| r.month).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(rows.size_hint().0 as u64, plan.total_months() - 3);

        assert!(schedule_rows(&CalculationInput { stock_price: 0.0, ..plan }).is_err());
    }
}
