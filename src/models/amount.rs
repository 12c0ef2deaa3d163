//! Fixed-point ICP amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use super::PLACEHOLDER;

/// Number of fractional digits in an e8s amount.
pub const E8S_SCALE: u32 = 8;

/// Fraction digits kept for display, matching the usual en-US locale output.
pub const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// Currency suffix appended to displayed balances.
pub const CURRENCY: &str = "ICP";

/// Converts an e8s count to whole tokens without losing precision.
pub fn e8s_to_tokens(e8s: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(e8s), E8S_SCALE)
}

/// Formats an optional e8s balance for display, e.g. `1,234.5 ICP`.
///
/// The amount is rounded half away from zero to three fraction digits,
/// trailing zeros are dropped and the integer part is grouped in thousands.
/// An absent balance renders as [`PLACEHOLDER`], never as zero.
pub fn format_balance(e8s: Option<u64>) -> String {
    match e8s {
        Some(e8s) => format!("{} {CURRENCY}", format_tokens(e8s_to_tokens(e8s))),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_tokens(tokens: Decimal) -> String {
    let rounded = tokens
        .round_dp_with_strategy(DISPLAY_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();

    match rounded.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => group_thousands(&rounded),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
