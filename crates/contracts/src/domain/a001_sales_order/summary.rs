use serde::{Deserialize, Serialize};

/// Totals under the lines. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub discount: f64,
    pub grand_total: f64,
}

impl OrderSummary {
    pub fn compute(line_totals: impl IntoIterator<Item = f64>, discount: f64) -> Self {
        let subtotal: f64 = line_totals.into_iter().sum();
        let discount = if discount.is_finite() && discount > 0.0 {
            discount
        } else {
            0.0
        };
        Self {
            subtotal,
            discount,
            grand_total: (subtotal - discount).max(0.0),
        }
    }
}

/// Reads the discount field the way a browser `parseFloat` would.
///
/// The leading number is taken (`"12abc"` is 12); blank, non-numeric and
/// negative input mean no discount.
pub fn parse_discount(raw: &str) -> f64 {
    match leading_float(raw) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Longest prefix of `raw` (after leading whitespace) that reads as a decimal number
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start.min(bytes.len())..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if digits > 0 || frac_end > end + 1 {
            digits += frac_end - (end + 1);
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exp_start = end + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(exp_start) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        let s = OrderSummary::compute([2000.0, 1500.0, 200.0], 700.0);
        assert_eq!(s.subtotal, 3700.0);
        assert_eq!(s.discount, 700.0);
        assert_eq!(s.grand_total, 3000.0);
    }

    #[test]
    fn test_grand_total_floors_at_zero() {
        let s = OrderSummary::compute([100.0], 500.0);
        assert_eq!(s.grand_total, 0.0);
    }

    #[test]
    fn test_negative_discount_is_ignored() {
        let s = OrderSummary::compute([100.0], -50.0);
        assert_eq!(s.discount, 0.0);
        assert_eq!(s.grand_total, 100.0);
    }

    #[test]
    fn test_parse_discount() {
        assert_eq!(parse_discount("700"), 700.0);
        assert_eq!(parse_discount(" 12.5 "), 12.5);
        assert_eq!(parse_discount(""), 0.0);
        assert_eq!(parse_discount("abc"), 0.0);
        assert_eq!(parse_discount("-3"), 0.0);
    }

    #[test]
    fn test_parse_discount_takes_leading_number() {
        assert_eq!(parse_discount("12abc"), 12.0);
        assert_eq!(parse_discount("1,500"), 1.0);
        assert_eq!(parse_discount("  .5 off"), 0.5);
        assert_eq!(parse_discount("7."), 7.0);
        assert_eq!(parse_discount("2e3"), 2000.0);
        assert_eq!(parse_discount("2e"), 2.0);
        assert_eq!(parse_discount("-12abc"), 0.0);
        assert_eq!(parse_discount("."), 0.0);
        assert_eq!(parse_discount("abc12"), 0.0);
    }
}
