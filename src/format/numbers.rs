//! Number grouping and the incentive fee rule.

/// Percentage of a deposit that is paid out to voters.
const VOTER_SHARE_PERCENT: f64 = 95.0;

/// Number of digits after the decimal point in the shortest representation
/// of `value`. Integral values have zero.
pub fn decimal_places(value: f64) -> usize {
    if !value.is_finite() || value.fract() == 0.0 {
        return 0;
    }
    value
        .to_string()
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

/// Gross up a net incentive amount by the platform fee.
///
/// Deposits are registered net of a 5% fee, so the amount a depositor
/// actually paid is `amount / 0.95`. The result keeps the precision of the
/// input, extended by at most one digit.
///
/// ```
/// use incentive_market::format::add_incentive_fee;
/// assert_eq!(add_incentive_fee(95.0), 100.0);
/// ```
pub fn add_incentive_fee(amount: f64) -> f64 {
    let decimals = decimal_places(amount);
    let total = amount / VOTER_SHARE_PERCENT * 100.0;

    if decimal_places(total) > decimals {
        return round_to(total, decimals + 1);
    }
    total
}

fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Format a number with comma thousands separators.
///
/// With `decimals` set (and non-zero) the number is first rendered with
/// exactly that many fractional digits. Only the whole part is grouped.
pub fn commify(value: f64, decimals: Option<usize>) -> String {
    let repr = match decimals {
        Some(places) if places > 0 => format!("{:.*}", places, value),
        _ => value.to_string(),
    };
    group_thousands(&repr)
}

/// Insert thousands separators into the whole part of a decimal string.
pub fn group_thousands(repr: &str) -> String {
    let (whole, fraction) = match repr.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (repr, None),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", whole),
    };

    let mut out = String::with_capacity(repr.len() + digits.len() / 3);
    out.push_str(sign);
    let len = digits.chars().count();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
