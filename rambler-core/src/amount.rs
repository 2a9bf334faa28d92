//! Lenient parsing of currency-formatted and loosely formatted numbers.
//!
//! Dataset cells and request values arrive as text such as `"₹1,200"`,
//! `"$12.50"` or `"09:00"`. These helpers pull the first number out of such
//! text and return `None` when no digits are present.

/// Parse the first numeric run in `raw`, ignoring currency symbols and
/// thousands separators.
///
/// A `-` directly before the number marks a negative value. A `.` directly
/// before the first digit starts a fraction, so `"$.50"` is `0.5`, unless it
/// ends an abbreviation such as `"Rs.50"`.
///
/// # Examples
/// ```
/// use rambler_core::amount::parse_amount;
///
/// assert_eq!(parse_amount("₹1,200"), Some(1200.0));
/// assert_eq!(parse_amount("$12.50 per head"), Some(12.5));
/// assert_eq!(parse_amount("free"), None);
/// ```
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '_'))
        .collect();
    let first_digit = compact.find(|c: char| c.is_ascii_digit())?;
    let lead = compact.get(..first_digit)?;
    // `Rs.500` abbreviates; `$.50` is a fraction.
    let (start, sign_prefix) = match lead.strip_suffix('.') {
        Some(before_point)
            if before_point
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphabetic()) =>
        {
            (first_digit.saturating_sub(1), before_point)
        }
        _ => (first_digit, lead),
    };
    let negative = sign_prefix.ends_with('-');
    let digits: String = compact
        .get(start..)?
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let magnitude = digits.trim_end_matches('.').parse::<f64>().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    Some(if negative {
        magnitude.copysign(-1.0)
    } else {
        magnitude
    })
}

/// A twelve-hour clock suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon, `am` or `a.m.`.
    Am,
    /// After noon, `pm` or `p.m.`.
    Pm,
}

impl Meridiem {
    /// Read a trailing `am`/`pm` marker, ignoring case, dots and spaces.
    #[must_use]
    pub fn from_suffix(raw: &str) -> Option<Self> {
        let letters: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();
        if letters.ends_with("am") {
            Some(Self::Am)
        } else if letters.ends_with("pm") {
            Some(Self::Pm)
        } else {
            None
        }
    }

    /// Convert a clock hour in `1..=12` to an hour of day.
    #[must_use]
    pub fn to_day_hour(self, hour: u8) -> Option<u8> {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let morning = if hour == 12 { 0 } else { hour };
        Some(match self {
            Self::Am => morning,
            Self::Pm => morning.saturating_add(12),
        })
    }
}

/// Parse an hour of day in `0..=23` from text such as `"9"`, `"09:00"`,
/// `"21.0"` or `"9 PM"`.
///
/// Fractional parts are dropped. Values outside the day, and clock hours
/// outside `1..=12` before an `am`/`pm` suffix, are rejected.
///
/// # Examples
/// ```
/// use rambler_core::amount::parse_hour;
///
/// assert_eq!(parse_hour("09:30"), Some(9));
/// assert_eq!(parse_hour("9 PM"), Some(21));
/// assert_eq!(parse_hour("24"), None);
/// ```
#[must_use]
pub fn parse_hour(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let hour = digits.parse::<u8>().ok()?;
    match Meridiem::from_suffix(trimmed) {
        Some(meridiem) => meridiem.to_day_hour(hour),
        None => (hour <= 23).then_some(hour),
    }
}

/// Convert a real-valued hour into `0..=23`, dropping any fractional part.
///
/// Returns `None` for non-finite values and values outside the day.
#[must_use]
pub fn hour_from_f64(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    let whole = value.floor();
    (0_u8..=23).find(|hour| f64::from(*hour) == whole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10", Some(10.0))]
    #[case(" 1,250.75 ", Some(1250.75))]
    #[case("₹1,200", Some(1200.0))]
    #[case("Rs.500", Some(500.0))]
    #[case("1 200 INR", Some(1200.0))]
    #[case("-15", Some(-15.0))]
    #[case("USD -3.5", Some(-3.5))]
    #[case("12.", Some(12.0))]
    #[case("$.50", Some(0.5))]
    #[case("₹.75", Some(0.75))]
    #[case("-.5", Some(-0.5))]
    #[case("Rs. 40", Some(40.0))]
    #[case("", None)]
    #[case("free", None)]
    #[case("--", None)]
    fn parses_amounts(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(raw), expected);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("23", Some(23))]
    #[case("7:45", Some(7))]
    #[case("21.0", Some(21))]
    #[case("24", None)]
    #[case("noon", None)]
    #[case("-1", None)]
    #[case("9 PM", Some(21))]
    #[case("9am", Some(9))]
    #[case("12 a.m.", Some(0))]
    #[case("12pm", Some(12))]
    #[case("7:30 p.m.", Some(19))]
    #[case("13 pm", None)]
    #[case("0 am", None)]
    fn parses_hours(#[case] raw: &str, #[case] expected: Option<u8>) {
        assert_eq!(parse_hour(raw), expected);
    }

    #[rstest]
    #[case(9.0, Some(9))]
    #[case(9.75, Some(9))]
    #[case(23.99, Some(23))]
    #[case(24.0, None)]
    #[case(-0.5, None)]
    #[case(f64::NAN, None)]
    fn converts_real_hours(#[case] value: f64, #[case] expected: Option<u8>) {
        assert_eq!(hour_from_f64(value), expected);
    }
}
