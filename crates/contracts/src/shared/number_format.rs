//! Number formatting for amounts shown on order pages

/// Thousands separator used on order pages (en-US grouping)
pub const THOUSANDS_SEPARATOR: char = ',';

/// Formats a currency amount: grouped, no decimals, no currency symbol.
///
/// Fractions round half away from zero. The page supplies the "MMK" label
/// next to the figure.
///
/// # Examples
///
/// ```
/// use contracts::shared::number_format::format_currency;
/// assert_eq!(format_currency(1234567.0), "1,234,567");
/// ```
pub fn format_currency(amount: f64) -> String {
    // `round` is half away from zero, `{:.0}` alone would round half to even
    let formatted = format!("{:.0}", amount.round());

    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    // Insert the separator every 3 digits from the right
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }

    // "-0" is not a meaningful amount
    if grouped.chars().all(|c| c == '0') {
        return grouped;
    }
    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0");
        assert_eq!(format_currency(999.0), "999");
        assert_eq!(format_currency(1000.0), "1,000");
        assert_eq!(format_currency(3700.0), "3,700");
        assert_eq!(format_currency(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(2.5), "3");
        assert_eq!(format_currency(1234.567), "1,235");
        assert_eq!(format_currency(1499.4), "1,499");
        assert_eq!(format_currency(1499.5), "1,500");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(format_currency(-1234.0), "-1,234");
        assert_eq!(format_currency(-0.2), "0");
    }
}
