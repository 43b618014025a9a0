//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a decimal price as US dollars with two decimal places.
///
/// Usage in templates: `{{ product.price|usd }}`
#[askama::filter_fn]
pub fn usd(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    let (int, frac) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    // Upstream prices carry at most two decimal places; pad, never round.
    let frac = format!("{frac:0<2}");
    Ok(format!("${int}.{}", &frac[..2]))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_pads_to_two_decimals() {
        assert_eq!(usd::default().execute("4.5", askama::NO_VALUES).unwrap(), "$4.50");
        assert_eq!(
            usd::default().execute("109.95", askama::NO_VALUES).unwrap(),
            "$109.95"
        );
        assert_eq!(usd::default().execute("10", askama::NO_VALUES).unwrap(), "$10.00");
    }

    #[test]
    fn test_usd_formats_decimal_values() {
        let price = rust_decimal::Decimal::new(10995, 2);
        assert_eq!(usd::default().execute(price, askama::NO_VALUES).unwrap(), "$109.95");
    }
}
