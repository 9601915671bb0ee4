//! Number rounding and formatting.

/// Rounds to 2 decimal places, with ties rounded toward positive infinity.
///
/// Non-finite values are returned unchanged.
pub fn round_to_hundredths(x: f64) -> f64 {
    // `y + 0.5` is inexact once `y` has no fractional bits.
    let y = x * 100.0;
    let floor = y.floor();
    let rounded = if y - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / 100.0
}

/// Formats a number for display: integers without a decimal point, and
/// anything else rounded to 2 decimal places without trailing zeros.
pub fn format_number(x: f64) -> String {
    let x = if x.fract() == 0.0 { x } else { round_to_hundredths(x) };
    if x == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    x.to_string()
}
