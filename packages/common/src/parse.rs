use std::fmt;

/// Error returned when a stored or submitted enum string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    invalid: String,
    allowed: &'static [&'static str],
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, invalid: &str, allowed: &'static [&'static str]) -> Self {
        Self {
            kind,
            invalid: invalid.to_string(),
            allowed,
        }
    }

    /// The rejected input.
    pub fn invalid(&self) -> &str {
        &self.invalid
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.kind,
            self.invalid,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for ParseEnumError {}
