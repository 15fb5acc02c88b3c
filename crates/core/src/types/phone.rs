//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is not a digit or separator.
    #[error("phone number contains an invalid character: {0:?}")]
    InvalidCharacter(char),
    /// The input has too few or too many digits.
    #[error("phone number must have between {min} and {max} digits")]
    DigitCount {
        /// Minimum allowed digits.
        min: usize,
        /// Maximum allowed digits.
        max: usize,
    },
}

/// A phone number in canonical form.
///
/// Accepts an optional leading `+` followed by digits, with `-`, space, `(`
/// and `)` allowed as separators. Separators are dropped, so `+91-7697470397`
/// and `+91 76974 70397` parse to the same value.
///
/// ## Examples
///
/// ```
/// use easemyform_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+91-7697470397").unwrap();
/// assert_eq!(phone.as_str(), "+917697470397");
///
/// assert!(PhoneNumber::parse("").is_err());
/// assert!(PhoneNumber::parse("call me").is_err());
/// assert!(PhoneNumber::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits (E.164 allows short national numbers).
    pub const MIN_DIGITS: usize = 7;

    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty (after trimming)
    /// - Contains anything other than digits, separators and a leading `+`
    /// - Has fewer than 7 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (plus, rest) = trimmed
            .strip_prefix('+')
            .map_or((false, trimmed), |rest| (true, rest));

        let mut canonical = String::with_capacity(rest.len() + 1);
        if plus {
            canonical.push('+');
        }

        let mut digits = 0;
        for c in rest.chars() {
            match c {
                '0'..='9' => {
                    canonical.push(c);
                    digits += 1;
                }
                '-' | ' ' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(PhoneError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number with all but the last four digits masked.
    ///
    /// Used when a number has to appear in logs or on screen.
    #[must_use]
    pub fn masked(&self) -> String {
        let visible = 4.min(self.0.len());
        let split = self.0.len() - visible;
        let tail = self.0.get(split..).unwrap_or_default();
        format!("{}{tail}", "*".repeat(split))
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(PhoneNumber::parse("+91-7697470397").is_ok());
        assert!(PhoneNumber::parse("7697470397").is_ok());
        assert!(PhoneNumber::parse("+1 (555) 010-9999").is_ok());
        assert!(PhoneNumber::parse("  +44 20 7946 0958  ").is_ok());
    }

    #[test]
    fn test_separators_are_dropped() {
        let a = PhoneNumber::parse("+91-7697470397").unwrap();
        let b = PhoneNumber::parse("+91 76974 70397").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "+917697470397");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            PhoneNumber::parse("+91-76974x0397"),
            Err(PhoneError::InvalidCharacter('x'))
        );
        // A plus sign is only allowed at the start
        assert_eq!(
            PhoneNumber::parse("91+7697470397"),
            Err(PhoneError::InvalidCharacter('+'))
        );
    }

    #[test]
    fn test_parse_digit_count() {
        assert!(matches!(
            PhoneNumber::parse("123456"),
            Err(PhoneError::DigitCount { .. })
        ));
        assert!(matches!(
            PhoneNumber::parse("1234567890123456"),
            Err(PhoneError::DigitCount { .. })
        ));
    }

    #[test]
    fn test_masked() {
        let phone = PhoneNumber::parse("+91-7697470397").unwrap();
        assert_eq!(phone.masked(), "*********0397");
    }

    #[test]
    fn test_serde_transparent() {
        let phone = PhoneNumber::parse("+91-7697470397").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+917697470397\"");
    }
}
