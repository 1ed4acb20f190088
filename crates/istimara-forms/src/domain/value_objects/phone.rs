//! Phone Value Object
//!
//! Validated phone number in the registry's accepted format: an optional
//! leading `+` followed by 9 to 15 digits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a raw phone number, tolerating spaces, dashes and parentheses.
    pub fn parse(value: impl Into<String>) -> Result<Self, PhoneError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let has_plus = trimmed.starts_with('+');
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != trimmed.chars().filter(|c| !"+ -()".contains(*c)).count() {
            return Err(PhoneError::InvalidCharacters);
        }

        if digits.len() < 9 || digits.len() > 15 {
            return Err(PhoneError::InvalidLength);
        }

        let normalized = if has_plus {
            format!("+{}", digits)
        } else {
            digits
        };

        Ok(Self(normalized))
    }

    /// Normalized number (digits, with leading `+` when supplied).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    Empty,
    InvalidLength,
    InvalidCharacters,
}

impl std::error::Error for PhoneError {}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Phone number cannot be empty"),
            Self::InvalidLength => write!(f, "Phone number must have 9 to 15 digits"),
            Self::InvalidCharacters => write!(f, "Phone number contains invalid characters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_parse() {
        let phone = Phone::parse("07712345678").unwrap();
        assert_eq!(phone.as_str(), "07712345678");
    }

    #[test]
    fn test_phone_keeps_plus() {
        let phone = Phone::parse("+9647712345678").unwrap();
        assert_eq!(phone.as_str(), "+9647712345678");
    }

    #[test]
    fn test_phone_strips_separators() {
        let phone = Phone::parse("+964 771 234-5678").unwrap();
        assert_eq!(phone.as_str(), "+9647712345678");
    }

    #[test]
    fn test_empty_phone() {
        assert!(matches!(Phone::parse("  "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_phone_too_short() {
        assert!(matches!(Phone::parse("12345"), Err(PhoneError::InvalidLength)));
    }

    #[test]
    fn test_phone_rejects_letters() {
        assert!(matches!(
            Phone::parse("0771abc5678"),
            Err(PhoneError::InvalidCharacters)
        ));
    }
}
