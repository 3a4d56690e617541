//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Formats a `Decimal` amount as money with two decimal places.
///
/// Usage in templates: `{{ product.price|money }}`
#[askama::filter_fn]
pub fn money(
    value: impl std::borrow::Borrow<Decimal>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format!("${:.2}", value.borrow().round_dp(2)))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(
            money::default()
                .execute(&dec("19.9"), askama::NO_VALUES)
                .unwrap(),
            "$19.90"
        );
        assert_eq!(
            money::default()
                .execute(&dec("5"), askama::NO_VALUES)
                .unwrap(),
            "$5.00"
        );
        assert_eq!(
            money::default()
                .execute(&dec("0.005"), askama::NO_VALUES)
                .unwrap(),
            "$0.00"
        );
    }
}
