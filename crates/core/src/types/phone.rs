//! Kazakhstan phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input contains no digits.
    #[error("phone number cannot be empty")]
    Empty,
    /// The digits do not form a Kazakhstan number.
    #[error("phone number must be a Kazakhstan number (7 followed by 10 digits)")]
    InvalidFormat,
}

/// A Kazakhstan phone number, stored in normalized digit form.
///
/// Accepts any human formatting (`+7 (701) 234-56-78`, `8-701-...` is NOT
/// accepted - the country digit must be 7) and normalizes to the 11-digit
/// `7XXXXXXXXXX` form used by the backend.
///
/// ## Examples
///
/// ```
/// use dala_core::Phone;
///
/// let phone = Phone::parse("+7 (701) 234-56-78").unwrap();
/// assert_eq!(phone.as_str(), "77012345678");
///
/// assert!(Phone::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string, stripping all non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has no digits or the digits do not
    /// match the `7XXXXXXXXXX` Kazakhstan format.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if digits.len() != 11 || !digits.starts_with('7') {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(digits))
    }

    /// Returns the normalized digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formatted() {
        let phone = Phone::parse("+7 (701) 234-56-78").unwrap();
        assert_eq!(phone.as_str(), "77012345678");
    }

    #[test]
    fn test_parse_bare_digits() {
        assert!(Phone::parse("77012345678").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse("abc-def"), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_wrong_country_digit() {
        assert!(matches!(
            Phone::parse("87012345678"),
            Err(PhoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            Phone::parse("7701234567"),
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("770123456789"),
            Err(PhoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let phone = Phone::parse("77012345678").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"77012345678\"");
    }
}
