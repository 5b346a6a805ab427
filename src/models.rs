// src/models.rs
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Parameters of a monthly stock-purchase plan and the alternative savings rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub monthly_investment: f64,
    pub stock_price: f64,
    /// Annual dividend yield in percent of the stock price.
    pub dividend_rate: f64,
    /// Dividend payments per year.
    pub dividend_frequency: u32,
    pub years: u32,
    /// Annual rate in percent, compounded monthly.
    pub interest_rate: f64,
}

impl Default for CalculationInput {
    fn default() -> Self {
        CalculationInput {
            monthly_investment: 1_000_000.0,
            stock_price: 68_000.0,
            dividend_rate: 8.0,
            dividend_frequency: 2,
            years: 30,
            interest_rate: 7.0,
        }
    }
}

impl CalculationInput {
    /// Returns a copy with one field replaced. Integer fields truncate toward zero
    /// and saturate at the `u32` range.
    pub fn with_field(&self, field: InputField, value: f64) -> CalculationInput {
        let mut next = *self;
        match field {
            InputField::MonthlyInvestment => next.monthly_investment = value,
            InputField::StockPrice => next.stock_price = value,
            InputField::DividendRate => next.dividend_rate = value,
            InputField::DividendFrequency => next.dividend_frequency = value as u32,
            InputField::Years => next.years = value as u32,
            InputField::InterestRate => next.interest_rate = value,
        }
        next
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::MonthlyInvestment => self.monthly_investment,
            InputField::StockPrice => self.stock_price,
            InputField::DividendRate => self.dividend_rate,
            InputField::DividendFrequency => self.dividend_frequency as f64,
            InputField::Years => self.years as f64,
            InputField::InterestRate => self.interest_rate,
        }
    }

    pub fn total_months(&self) -> u64 {
        self.years as u64 * 12
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_shares: f64,
    pub total_dividends: f64,
    pub future_value_of_capital: f64,
    pub future_value_of_dividends: f64,
    pub total_opportunity_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    MonthlyInvestment,
    StockPrice,
    DividendRate,
    DividendFrequency,
    Years,
    InterestRate,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::MonthlyInvestment,
        InputField::StockPrice,
        InputField::DividendRate,
        InputField::DividendFrequency,
        InputField::Years,
        InputField::InterestRate,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            InputField::MonthlyInvestment => "monthlyInvestment",
            InputField::StockPrice => "stockPrice",
            InputField::DividendRate => "dividendRate",
            InputField::DividendFrequency => "dividendFrequency",
            InputField::Years => "years",
            InputField::InterestRate => "interestRate",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .iter()
            .copied()
            .find(|field| field.id() == s)
            .ok_or_else(|| format!("Unknown input field: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// One simulated month of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub month: u64,
    pub shares_held: f64,
    pub months_remaining: u64,
    pub contribution_future_value: f64,
    pub dividend_paid: f64,
    pub dividend_future_value: f64,
}
