//! Response parsing
//!
//! The backend is asked for digits only but answers in free text often
//! enough that the first run of ASCII digits is taken as the figure. A reply
//! that mentions a gram weight before the kcal total will be misread.

/// Upper sanity bound for a single meal, in kcal
pub const MAX_MEAL_CALORIES: u64 = 100_000;

/// Outcome of reading a calorie figure from response text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCalories {
    Valid(u32),
    /// A digit run was found but its value is above [`MAX_MEAL_CALORIES`]
    OutOfRange(u64),
    NoNumber,
}

/// First contiguous run of ASCII digits in `text`
pub fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Read the calorie figure from raw response text
pub fn parse_calories(text: &str) -> ParsedCalories {
    let Some(digits) = first_digit_run(text) else {
        return ParsedCalories::NoNumber;
    };

    // Saturating fold so a long digit run reads as "too large" instead of overflowing
    let value = digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });

    if value > MAX_MEAL_CALORIES {
        ParsedCalories::OutOfRange(value)
    } else {
        ParsedCalories::Valid(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_calories("850"), ParsedCalories::Valid(850));
        assert_eq!(parse_calories("  1200\n"), ParsedCalories::Valid(1200));
    }

    #[test]
    fn test_digits_inside_prose() {
        assert_eq!(
            parse_calories("Approximately 850 kcal total."),
            ParsedCalories::Valid(850)
        );
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(parse_calories("500g, 1200kcal"), ParsedCalories::Valid(500));
        assert_eq!(parse_calories("1,250"), ParsedCalories::Valid(1));
        assert_eq!(parse_calories("-300"), ParsedCalories::Valid(300));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_calories("I cannot estimate this"), ParsedCalories::NoNumber);
        assert_eq!(parse_calories(""), ParsedCalories::NoNumber);
        // Full-width digits are not ASCII digits
        assert_eq!(parse_calories("８５０"), ParsedCalories::NoNumber);
    }

    #[test]
    fn test_sanity_bound() {
        assert_eq!(parse_calories("100000"), ParsedCalories::Valid(100_000));
        assert_eq!(parse_calories("0"), ParsedCalories::Valid(0));
        assert_eq!(parse_calories("999999"), ParsedCalories::OutOfRange(999_999));
        assert_eq!(
            parse_calories("123456789012345678901234567890"),
            ParsedCalories::OutOfRange(u64::MAX)
        );
    }

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("about 42 or 43"), Some("42"));
        assert_eq!(first_digit_run("치킨 1200"), Some("1200"));
        assert_eq!(first_digit_run("none"), None);
    }
}
