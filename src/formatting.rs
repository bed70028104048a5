//! Display formatting shared by every page.

/// Inserts `,` between groups of three integer digits.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// `43,256.78` for prices from 1 up, six decimals below that.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        group_thousands(&format!("{:.2}", price))
    } else {
        format!("{:.6}", price)
    }
}

/// Compact form with a `T`/`B`/`M`/`K` suffix and two decimals.
pub fn format_large_number(value: f64) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{:.2}", value)
}

/// Magnitude of a percentage change; the arrow direction comes from [`trend_direction`].
pub fn format_percent_change(change: f64) -> String {
    format!("{:.2}%", change.abs())
}

/// `up` for non-negative changes, `down` otherwise.
pub fn trend_direction(change: f64) -> &'static str {
    if change >= 0.0 { "up" } else { "down" }
}

pub fn format_signed_percent(value: f64) -> String {
    if value >= 0.0 { format!("+{:.2}%", value) } else { format!("{:.2}%", value) }
}

/// `+$12.34` / `-$12.34`.
pub fn format_signed_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("+${:.2}", value)
    } else {
        format!("-${:.2}", value.abs())
    }
}

/// Coin amounts: two decimals for whole coins, six for fractions.
pub fn format_amount(amount: f64) -> String {
    if amount >= 1.0 { format!("{:.2}", amount) } else { format!("{:.6}", amount) }
}

pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

fn plural(count: u64, unit: &str) -> String {
    if count > 1 {
        format!("{} {}s ago", count, unit)
    } else {
        format!("{} {} ago", count, unit)
    }
}

/// Relative age of a timestamp, both arguments in milliseconds.
pub fn time_ago(timestamp: u64, now: u64) -> String {
    let seconds = now.saturating_sub(timestamp) / 1000;
    match seconds {
        0..=59 => "Just now".to_string(),
        60..=3_599 => plural(seconds / 60, "minute"),
        3_600..=86_399 => plural(seconds / 3_600, "hour"),
        _ => plural(seconds / 86_400, "day"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices() {
        let formatted = [43_256.78, 1_000_000.0, 1.0, 0.18, 0.000_012_3]
            .map(format_price)
            .join(" | ");
        insta::assert_snapshot!(formatted, @"43,256.78 | 1,000,000.00 | 1.00 | 0.180000 | 0.000012");
    }

    #[test]
    fn large_numbers() {
        let formatted = [1.5e12, 2.5e9, 3_210_000.0, 1_234.0, 999.0]
            .map(format_large_number)
            .join(" | ");
        insta::assert_snapshot!(formatted, @"1.50T | 2.50B | 3.21M | 1.23K | 999.00");
    }

    #[test]
    fn signed_values() {
        assert_eq!(format_signed_currency(12.5), "+$12.50");
        assert_eq!(format_signed_currency(-12.5), "-$12.50");
        assert_eq!(format_signed_percent(-3.456), "-3.46%");
        assert_eq!(format_percent_change(-3.456), "3.46%");
        assert_eq!(trend_direction(0.0), "up");
    }

    #[test]
    fn relative_time() {
        let now = 10 * 86_400_000;
        let formatted = [now - 30_000, now - 60_000, now - 7_200_000, now - 3 * 86_400_000]
            .map(|ts| time_ago(ts, now))
            .join(" | ");
        insta::assert_snapshot!(formatted, @"Just now | 1 minute ago | 2 hours ago | 3 days ago");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(12_500), "12,500");
        assert_eq!(format_count(999), "999");
    }
}
