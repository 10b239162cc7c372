//! Validated text primitives shared across the wardbed crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A bed identifier contained characters outside `[A-Za-z0-9-]`
    #[error("invalid bed identifier: {0}")]
    InvalidBedId(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
/// Ward names are carried as `NonEmptyText`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a single bed, e.g. `GM-03`.
///
/// Bed identifiers appear verbatim in the bed-number form field and as grid cell labels, so
/// they are restricted to ASCII alphanumerics and `-`. Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BedId(String);

impl BedId {
    /// Parses and validates a bed identifier.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::InvalidBedId` when the
    /// identifier contains anything other than ASCII alphanumerics and `-`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(TextError::InvalidBedId(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for BedId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BedId::new(s)
    }
}

impl serde::Serialize for BedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for BedId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BedId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  General Medicine ").expect("valid text");
        assert_eq!(text.as_str(), "General Medicine");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace_only() {
        let err = NonEmptyText::new("   ").expect_err("should reject whitespace");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn test_bed_id_accepts_prefixed_numbers() {
        let id = BedId::new("GM-03").expect("valid bed id");
        assert_eq!(id.to_string(), "GM-03");
    }

    #[test]
    fn test_bed_id_rejects_markup_characters() {
        let err = BedId::new("GM<03>").expect_err("should reject markup");
        assert!(matches!(err, TextError::InvalidBedId(s) if s == "GM<03>"));

        let err = BedId::new("GM 03").expect_err("should reject inner space");
        assert!(matches!(err, TextError::InvalidBedId(_)));
    }

    #[test]
    fn test_bed_id_deserialize_revalidates() {
        let ok: BedId = serde_json::from_str("\"ICU-01\"").expect("valid json bed id");
        assert_eq!(ok.as_str(), "ICU-01");

        let err = serde_json::from_str::<BedId>("\"\"");
        assert!(err.is_err());
    }
}
