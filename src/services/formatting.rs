// src/services/formatting.rs
use serde::Serialize;
use crate::models::{CalculationInput, CalculationResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub formatted: String,
    pub description: String,
    pub highlight: bool,
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

fn sign_prefix(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Vietnamese dong: `1.219.970.996 ₫`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    // -0.4 rounds to -0, which should not print a sign
    let sign = if rounded == 0.0 { "" } else { sign_prefix(rounded) };
    format!("{}{}\u{a0}₫", sign, group_thousands(&digits))
}

/// Share counts with at most two decimals: `5.294,12`.
pub fn format_shares(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if fixed.trim_matches(|c: char| c == '0' || c == '.').is_empty() { "" } else { sign_prefix(value) };

    if frac_part.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{},{}", sign, group_thousands(int_part), frac_part)
    }
}

/// The five result cards, captions filled from the input that produced them.
pub fn present(input: &CalculationInput, result: &CalculationResult) -> Vec<ResultCard> {
    vec![
        ResultCard {
            key: "totalShares",
            label: "Total shares accumulated",
            value: result.total_shares,
            formatted: format_shares(result.total_shares),
            description: format!("Shares you would own after {} years.", input.years),
            highlight: false,
        },
        ResultCard {
            key: "totalDividends",
            label: "Total dividends received",
            value: result.total_dividends,
            formatted: format_currency(result.total_dividends),
            description: "Dividend cash received, before any compounding.".to_string(),
            highlight: false,
        },
        ResultCard {
            key: "futureValueOfCapital",
            label: "Capital if saved instead",
            value: result.future_value_of_capital,
            formatted: format_currency(result.future_value_of_capital),
            description: format!(
                "Your monthly contributions grown at {}% a year.",
                input.interest_rate
            ),
            highlight: false,
        },
        ResultCard {
            key: "futureValueOfDividends",
            label: "Dividends if deposited",
            value: result.future_value_of_dividends,
            formatted: format_currency(result.future_value_of_dividends),
            description: "Each dividend payment compounded from the month it was received.".to_string(),
            highlight: false,
        },
        ResultCard {
            key: "totalOpportunityCost",
            label: "Total opportunity cost",
            value: result.total_opportunity_cost,
            formatted: format_currency(result.total_opportunity_cost),
            description: format!(
                "Capital plus dividends after {} years of compounding.",
                input.years
            ),
            highlight: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_dot_grouping() {
        assert_eq!(format_currency(1_219_970_995.7759395), "1.219.970.996\u{a0}₫");
        assert_eq!(format_currency(999.4), "999\u{a0}₫");
        assert_eq!(format_currency(1_000.0), "1.000\u{a0}₫");
        assert_eq!(format_currency(0.0), "0\u{a0}₫");
        assert_eq!(format_currency(-0.4), "0\u{a0}₫");
        assert_eq!(format_currency(-12_345.0), "-12.345\u{a0}₫");
    }

    #[test]
    fn shares_keep_two_decimals_at_most() {
        assert_eq!(format_shares(5_294.117647058823), "5.294,12");
        assert_eq!(format_shares(600.0), "600");
        assert_eq!(format_shares(12.5), "12,5");
        assert_eq!(format_shares(0.001), "0");
    }

    #[test]
    fn cards_quote_the_input() {
        let input = CalculationInput::default();
        let result = CalculationResult {
            total_shares: 10.0,
            total_dividends: 1.0,
            future_value_of_capital: 2.0,
            future_value_of_dividends: 3.0,
            total_opportunity_cost: 5.0,
        };
        let cards = present(&input, &result);
        assert_eq!(cards.len(), 5);
        assert!(cards[0].description.contains("30 years"));
        assert!(cards[2].description.contains("7%"));
        assert_eq!(cards.iter().filter(|c| c.highlight).count(), 1);
        assert_eq!(cards[4].formatted, "5\u{a0}₫");
    }
}
