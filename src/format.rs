//! Display helpers for addresses, hashes, durations and token amounts.

use crate::error::Error;

pub const EMPTY_PLACEHOLDER: &str = "—";

const ELLIPSIS: &str = "...";

pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address
            .strip_prefix("0x")
            .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// `0xf39f...2266` for `chars = 4`. Short inputs are returned unchanged.
pub fn format_address(address: &str, chars: usize) -> String {
    if address.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    let all: Vec<char> = address.chars().collect();
    if all.len() <= chars * 2 + 2 {
        return address.to_string();
    }
    let head: String = all[..chars + 2].iter().collect();
    let tail: String = all[all.len() - chars..].iter().collect();
    format!("{head}{ELLIPSIS}{tail}")
}

pub fn truncate_middle(s: &str, max_len: usize) -> String {
    let all: Vec<char> = s.chars().collect();
    if all.len() <= max_len {
        return s.to_string();
    }
    let half = max_len.saturating_sub(ELLIPSIS.len()) / 2;
    let head: String = all[..half].iter().collect();
    let tail: String = all[all.len() - half..].iter().collect();
    format!("{head}{ELLIPSIS}{tail}")
}

pub fn explorer_url(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("https://etherscan.io"),
        8453 => Some("https://basescan.org"),
        84532 => Some("https://sepolia.basescan.org"),
        _ => None,
    }
}

pub fn tx_url(chain_id: u64, tx_hash: &str) -> Option<String> {
    explorer_url(chain_id).map(|base| format!("{base}/tx/{tx_hash}"))
}

pub fn address_url(chain_id: u64, address: &str) -> Option<String> {
    explorer_url(chain_id).map(|base| format!("{base}/address/{address}"))
}

pub fn format_duration(seconds: u64) -> String {
    match seconds {
        0..60 => format!("{seconds}s"),
        60..3600 => format!("{}m", seconds / 60),
        3600..86_400 => format!("{:.1}h", seconds as f64 / 3600.0),
        _ => format!("{:.1}d", seconds as f64 / 86_400.0),
    }
}

/// "just now", "5m left", "3h ago", "2d left" relative to `now_ms`.
pub fn format_relative_time(target_ms: i64, now_ms: i64) -> String {
    let diff = target_ms.saturating_sub(now_ms);
    let abs = diff.unsigned_abs();
    let direction = if diff > 0 { "left" } else { "ago" };
    match abs {
        0..60_000 => "just now".to_string(),
        60_000..3_600_000 => format!("{}m {direction}", abs / 60_000),
        3_600_000..86_400_000 => format!("{}h {direction}", abs / 3_600_000),
        _ => format!("{}d {direction}", abs / 86_400_000),
    }
}

fn group_thousands(n: u128) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar display. `compact` abbreviates thousands and millions to two
/// places (`$1.23M`); otherwise the value is grouped with `decimals` places.
/// Non-finite input shows as zero.
pub fn format_usd(value: f64, compact: bool, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if compact && value >= 1_000_000.0 {
        return format!("${:.2}M", value / 1_000_000.0);
    }
    if compact && value >= 1_000.0 {
        return format!("${:.2}K", value / 1_000.0);
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut out = String::from("$");
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_digits(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Base units to a grouped decimal string, rounded half-up to
/// `display_decimals` with trailing zeros trimmed: `1234567890` at 6
/// decimals is `1,234.56789`.
pub fn format_token_amount(amount: u128, decimals: u32, display_decimals: u32) -> String {
    let shown = display_decimals.min(decimals);
    let scaled = match 10u128.checked_pow(decimals - shown) {
        Some(divisor) => {
            let remainder = amount % divisor;
            let rounded_up = divisor > 1 && remainder >= divisor - remainder;
            amount / divisor + u128::from(rounded_up)
        }
        None => 0,
    };
    let unit = 10u128.checked_pow(shown).unwrap_or(u128::MAX);
    let whole = scaled / unit;
    let fraction = scaled % unit;

    let mut out = group_thousands(whole);
    if fraction > 0 {
        let padded = format!("{fraction:0width$}", width = shown as usize);
        out.push('.');
        out.push_str(padded.trim_end_matches('0'));
    }
    out
}

/// Decimal text to base units. Digits past `decimals` are truncated.
pub fn parse_token_amount(input: &str, decimals: u32) -> Result<u128, Error> {
    let invalid = |reason: &str| Error::Validation {
        reason: format!("invalid token amount {input:?}: {reason}"),
    };
    let trimmed = input.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected digits with an optional decimal point"));
    }

    let unit = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| invalid("too many decimals"))?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| invalid("overflow"))?
            .checked_mul(unit)
            .ok_or_else(|| invalid("overflow"))?
    };

    let kept: String = fraction.chars().take(decimals as usize).collect();
    let fraction_units = if kept.is_empty() {
        0
    } else {
        let pad = 10u128.pow(decimals - kept.len() as u32);
        kept.parse::<u128>().map_err(|_| invalid("overflow"))? * pad
    };

    whole_units
        .checked_add(fraction_units)
        .ok_or_else(|| invalid("overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn address_validation() {
        assert!(is_valid_address(ADDR));
        assert!(is_valid_address("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert!(!is_valid_address("f39fd6e51aad88f6f4ce6ab8827279cfffb9226600"));
        assert!(!is_valid_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226"));
        assert!(!is_valid_address("0xz39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn address_shortening() {
        assert_eq!(format_address(ADDR, 4), "0xf39f...2266");
        assert_eq!(format_address(ADDR, 6), "0xf39fd6...b92266");
        assert_eq!(format_address("0x1234", 4), "0x1234");
        assert_eq!(format_address("", 4), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn middle_truncation() {
        assert_eq!(truncate_middle("short", 20), "short");
        assert_eq!(
            truncate_middle("0x0123456789abcdef0123456789abcdef", 20),
            "0x012345...89abcdef"
        );
        assert_eq!(truncate_middle("abcdef", 3), "...");
    }

    #[test]
    fn explorer_links() {
        assert_eq!(
            tx_url(8453, "0xabc").as_deref(),
            Some("https://basescan.org/tx/0xabc")
        );
        assert_eq!(
            address_url(84532, ADDR),
            Some(format!("https://sepolia.basescan.org/address/{ADDR}"))
        );
        assert_eq!(explorer_url(31337), None);
        assert_eq!(tx_url(999, "0xabc"), None);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(3599), "59m");
        assert_eq!(format_duration(5400), "1.5h");
        assert_eq!(format_duration(86_400 * 30), "30.0d");
    }

    #[test]
    fn relative_times() {
        let now = 1_700_000_000_000;
        assert_eq!(format_relative_time(now + 30_000, now), "just now");
        assert_eq!(format_relative_time(now + 5 * 60_000, now), "5m left");
        assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3h ago");
        assert_eq!(format_relative_time(now + 2 * 86_400_000, now), "2d left");
    }

    #[test]
    fn token_amount_formatting() {
        assert_eq!(format_token_amount(1_234_567_890, 6, 6), "1,234.56789");
        assert_eq!(format_token_amount(1_000_000_000_000_000_000, 18, 6), "1");
        assert_eq!(format_token_amount(1_999_999_999_999_999_999, 18, 6), "2");
        assert_eq!(format_token_amount(1_500_000, 6, 2), "1.5");
        assert_eq!(format_token_amount(4_999, 6, 2), "0");
        assert_eq!(format_token_amount(5_000, 6, 2), "0.01");
        assert_eq!(format_token_amount(0, 18, 6), "0");
        assert_eq!(format_token_amount(123_456_789, 0, 6), "123,456,789");
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(1_234_567.891, false, 2), "$1,234,567.89");
        assert_eq!(format_usd(0.0, false, 2), "$0.00");
        assert_eq!(format_usd(999.0, false, 0), "$999");
        assert_eq!(format_usd(12.5, false, 4), "$12.5000");
        assert_eq!(format_usd(-1_500.25, false, 2), "$-1,500.25");
        assert_eq!(format_usd(f64::NAN, false, 2), "$0.00");

        assert_eq!(format_usd(1_234_567.0, true, 2), "$1.23M");
        assert_eq!(format_usd(1_500.0, true, 2), "$1.50K");
        assert_eq!(format_usd(1_000.0, true, 2), "$1.00K");
        assert_eq!(format_usd(999.5, true, 2), "$999.50");
        assert_eq!(format_usd(-2_000_000.0, true, 2), "$-2,000,000.00");
    }

    #[test]
    fn token_amount_parsing() {
        assert_eq!(parse_token_amount("1.5", 6).ok(), Some(1_500_000));
        assert_eq!(parse_token_amount(" 42 ", 0).ok(), Some(42));
        assert_eq!(parse_token_amount(".25", 2).ok(), Some(25));
        assert_eq!(parse_token_amount("3.", 2).ok(), Some(300));
        assert_eq!(parse_token_amount("0.1234567", 6).ok(), Some(123_456));
        assert_eq!(
            parse_token_amount("1", 18).ok(),
            Some(1_000_000_000_000_000_000)
        );

        for bad in ["", ".", "-1", "1e6", "1.2.3", "abc", "1,000"] {
            assert!(
                matches!(parse_token_amount(bad, 6), Err(Error::Validation { .. })),
                "{bad:?} should be rejected"
            );
        }
        assert!(parse_token_amount("340282366920938463463374607431768211455", 1).is_err());
    }
}
