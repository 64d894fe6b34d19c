//! Invoice numbering.
//!
//! Human-readable sequential numbers: a constant prefix plus a zero-padded
//! counter (`FAC-001`, `FAC-002`, …). The store owns the counter and advances
//! it atomically with each insert; this module only knows how to format a
//! counter value and how to seed the counter from a pre-existing number.
//! Numbers are never reused; deletion leaves gaps.

/// Constant prefix for every invoice number.
pub const NUMBER_PREFIX: &str = "FAC-";

/// Minimum digit width; the counter grows past it naturally (`FAC-1000`).
pub const NUMBER_WIDTH: usize = 3;

/// Format a counter value as an invoice number.
pub fn format_number(n: u64) -> String {
    format!("{NUMBER_PREFIX}{n:0width$}", width = NUMBER_WIDTH)
}

/// Derive the counter seed (last used value) from the most recent invoice
/// number, if any.
///
/// The seed is the trailing run of decimal digits of the previous number.
/// A previous number without trailing digits seeds at 0, so numbering
/// always progresses and never errors.
pub fn seed_from(last_number: Option<&str>) -> u64 {
    let Some(last) = last_number else {
        return 0;
    };
    let digits: String = last
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_is_fac_001() {
        assert_eq!(format_number(seed_from(None) + 1), "FAC-001");
    }

    #[test]
    fn increments_trailing_digits() {
        assert_eq!(format_number(seed_from(Some("FAC-003")) + 1), "FAC-004");
        assert_eq!(format_number(seed_from(Some("FAC-099")) + 1), "FAC-100");
    }

    #[test]
    fn number_without_trailing_digits_restarts_at_one() {
        assert_eq!(format_number(seed_from(Some("INV")) + 1), "FAC-001");
        assert_eq!(format_number(seed_from(Some("FAC-")) + 1), "FAC-001");
    }

    #[test]
    fn width_grows_past_999() {
        assert_eq!(format_number(1000), "FAC-1000");
        assert_eq!(format_number(seed_from(Some("FAC-999")) + 1), "FAC-1000");
    }

    #[test]
    fn seed_ignores_non_trailing_digits() {
        // Only the trailing run counts.
        assert_eq!(seed_from(Some("F2C-007")), 7);
        assert_eq!(seed_from(Some("2024-FAC")), 0);
    }
}
