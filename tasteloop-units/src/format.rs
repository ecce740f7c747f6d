//! Display formatting for converted magnitudes

/// Format a magnitude with precision that shrinks as the magnitude grows.
///
/// `|m| >= 100` prints no decimals, `10 <= |m| < 100` one, anything smaller
/// two. Halfway cases round away from zero (0.125 prints "0.13").
/// Non-finite values print as-is.
pub fn format_for_display(magnitude: f64) -> String {
    if !magnitude.is_finite() {
        return magnitude.to_string();
    }
    let abs = magnitude.abs();
    if abs >= 100.0 {
        format!("{:.0}", magnitude.round())
    } else if abs >= 10.0 {
        format!("{:.1}", round_to(magnitude, 1))
    } else {
        format!("{:.2}", round_to(magnitude, 2))
    }
}

// `{:.N}` alone rounds exact ties to even
fn round_to(n: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (n * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_bands() {
        assert_eq!(format_for_display(7.4567), "7.46");
        assert_eq!(format_for_display(123.4), "123");
        assert_eq!(format_for_display(42.19), "42.2");
        assert_eq!(format_for_display(240.0), "240");
        assert_eq!(format_for_display(1000.0), "1000");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(format_for_display(100.0), "100");
        assert_eq!(format_for_display(10.0), "10.0");
        assert_eq!(format_for_display(9.999), "10.00");
        assert_eq!(format_for_display(0.0), "0.00");
    }

    #[test]
    fn test_negative_uses_absolute_value() {
        assert_eq!(format_for_display(-273.15), "-273");
        assert_eq!(format_for_display(-17.7778), "-17.8");
        assert_eq!(format_for_display(-0.5), "-0.50");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_for_display(0.125), "0.13");
        assert_eq!(format_for_display(12.25), "12.3");
        assert_eq!(format_for_display(100.5), "101");
        assert_eq!(format_for_display(-250.5), "-251");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(format_for_display(f64::NAN), "NaN");
        assert_eq!(format_for_display(f64::INFINITY), "inf");
        assert_eq!(format_for_display(f64::NEG_INFINITY), "-inf");
    }
}
