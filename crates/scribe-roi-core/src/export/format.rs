//! Display formatting for ROI figures (en-GB conventions).

/// Format seconds as `"3m 30s"`, `"3m"`, or `"45s"`. Rounds to whole seconds.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.abs().round() as u64;
    let sign = if seconds < 0.0 && total > 0 { "-" } else { "" };
    let (mins, secs) = (total / 60, total % 60);

    match (mins, secs) {
        (0, s) => format!("{sign}{s}s"),
        (m, 0) => format!("{sign}{m}m"),
        (m, s) => format!("{sign}{m}m {s}s"),
    }
}

/// Format an amount in pounds with thousands separators, e.g. `"£2,569"`.
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let number = format_number(amount.abs(), decimals);
    let is_zero = number.chars().all(|c| matches!(c, '0' | ',' | '.'));
    if amount < 0.0 && !is_zero {
        format!("-£{number}")
    } else {
        format!("£{number}")
    }
}

/// Format hours with one decimal, e.g. `"15.8 hrs"`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1} hrs", round_half_away(hours, 1))
}

/// Format an ROI multiplier with no decimals, e.g. `"7x"`.
pub fn format_multiplier(roi: f64) -> String {
    format!("{:.0}x", round_half_away(roi, 0))
}

/// Format a count rounded to a whole number, with thousands separators.
pub fn format_count(value: f64) -> String {
    let grouped = format_number(value.abs(), 0);
    if value.round() < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Non-negative number with fixed decimals and comma grouping.
fn format_number(value: f64, decimals: usize) -> String {
    let value = round_half_away(value, decimals);
    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Round to `decimals` places with ties away from zero.
///
/// `format!` rounds ties to even, so values are rounded here first.
fn round_half_away(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
