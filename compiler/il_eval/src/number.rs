//! Textual form of floats.

/// Shortest text that reads back as `f`.
///
/// Plain decimal while the decimal exponent is in `-4..6`, exponent form
/// with a signed two-digit minimum exponent otherwise (`1e+06`, `2.5e-07`).
/// Infinities print as `+Inf`/`-Inf`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }
    // `{:e}` yields the shortest round-trip digits, e.g. `-2.5e-7`.
    let scientific = format!("{f:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        return f.to_string();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
