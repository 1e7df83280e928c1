//! Half-step rating values.
//!
//! A [`Rating`] is stored as a count of half stars so that comparisons and
//! formatting never go through float-to-decimal conversion. The formatting
//! helpers below follow the same approach as the wasm float helpers: build the
//! string from integers only.

/// A non-negative rating in steps of 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Rating {
    half_steps: u16,
}

impl Rating {
    pub const ZERO: Rating = Rating { half_steps: 0 };

    /// Whole stars.
    pub fn whole(stars: u8) -> Self {
        Self {
            half_steps: u16::from(stars) * 2,
        }
    }

    pub fn from_half_steps(half_steps: u16) -> Self {
        Self { half_steps }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.half_steps) / 2.0
    }

    /// Candidate value for a pointer at `offset_x` inside the star at
    /// `position` (1-based) that is `width` pixels wide.
    ///
    /// The left half of a star selects the half value below it; the right half
    /// (midpoint included) selects the whole value.
    pub fn from_pointer(position: u8, offset_x: f64, width: f64) -> Self {
        let whole = Self::whole(position);
        if offset_x < width / 2.0 {
            Self {
                half_steps: whole.half_steps.saturating_sub(1),
            }
        } else {
            whole
        }
    }

    /// One-decimal form written back into the rating input (`"2.5"`, `"5.0"`).
    pub fn to_input_string(self) -> String {
        let int_part = self.half_steps / 2;
        let frac = if self.half_steps % 2 == 0 { '0' } else { '5' };
        format!("{int_part}.{frac}")
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_input_string())
    }
}

/// Lenient parse of the rating input's current text.
///
/// Empty, unparseable or non-finite text reads as `0.0`. The raw number is
/// returned unsnapped, since a server-rendered value like `3.7` must still
/// compare unequal to every half-step candidate.
pub fn parse_rating_input(raw: &str) -> f64 {
    let s = raw.trim();
    if let Ok(v) = s.parse::<f64>() {
        return if v.is_finite() { v } else { 0.0 };
    }

    // Accept a leading numeric prefix ("4.5 stars", "1.2.3").
    s[..numeric_prefix_len(s)]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;
    if b.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_half_selects_half_below() {
        assert_eq!(Rating::from_pointer(3, 0.0, 20.0).as_f64(), 2.5);
        assert_eq!(Rating::from_pointer(3, 9.99, 20.0).as_f64(), 2.5);
        assert_eq!(Rating::from_pointer(1, 2.0, 20.0).as_f64(), 0.5);
    }

    #[test]
    fn midpoint_and_right_half_select_whole() {
        assert_eq!(Rating::from_pointer(3, 10.0, 20.0).as_f64(), 3.0);
        assert_eq!(Rating::from_pointer(5, 19.0, 20.0).as_f64(), 5.0);
    }

    #[test]
    fn input_string_has_one_decimal() {
        assert_eq!(Rating::ZERO.to_input_string(), "0.0");
        assert_eq!(Rating::from_half_steps(5).to_input_string(), "2.5");
        assert_eq!(Rating::whole(5).to_input_string(), "5.0");
        assert_eq!(Rating::from_half_steps(19).to_string(), "9.5");
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(parse_rating_input(""), 0.0);
        assert_eq!(parse_rating_input("   "), 0.0);
        assert_eq!(parse_rating_input("abc"), 0.0);
        assert_eq!(parse_rating_input("NaN"), 0.0);
        assert_eq!(parse_rating_input("inf"), 0.0);
        assert_eq!(parse_rating_input(" 3.5 "), 3.5);
        assert_eq!(parse_rating_input("4.5 stars"), 4.5);
        assert_eq!(parse_rating_input("3.7"), 3.7);
    }

    #[test]
    fn prefix_parse_stops_where_a_number_ends() {
        assert_eq!(parse_rating_input("1.2.3"), 1.2);
        assert_eq!(parse_rating_input("-2.5abc"), -2.5);
        assert_eq!(parse_rating_input(".5."), 0.5);
        assert_eq!(parse_rating_input("4."), 4.0);
        assert_eq!(parse_rating_input("2e1x"), 20.0);
        assert_eq!(parse_rating_input("3e"), 3.0);
        assert_eq!(parse_rating_input("3e+"), 3.0);
        assert_eq!(parse_rating_input("+.x"), 0.0);
        assert_eq!(parse_rating_input("-"), 0.0);
    }
}
