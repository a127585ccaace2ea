//! # Composition Error Types
//!
//! Error types for ingredient-list editing, catalog normalization and variant
//! submission.

/// Errors raised while editing or normalizing a composition
#[derive(Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// A row index outside the current list
    IndexOutOfRange { index: usize, len: usize },
    /// A catalog record with no usable identifier
    MissingIdentifier(String),
    /// An unrecognized `sourceType` value
    UnknownSourceType(String),
    /// An unrecognized variant `type` value
    UnknownVariantType(String),
    /// A payload that is not shaped like a variant or ingredient
    InvalidPayload(String),
    /// Parallel name/price arrays of different lengths
    LengthMismatch { names: usize, prices: usize },
}

impl std::fmt::Display for CompositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompositionError::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} out of range for list of {len}")
            }
            CompositionError::MissingIdentifier(msg) => write!(f, "Missing identifier: {msg}"),
            CompositionError::UnknownSourceType(value) => {
                write!(f, "Unknown source type: {value}")
            }
            CompositionError::UnknownVariantType(value) => {
                write!(f, "Unknown variant type: {value}")
            }
            CompositionError::InvalidPayload(msg) => write!(f, "Invalid payload: {msg}"),
            CompositionError::LengthMismatch { names, prices } => write!(
                f,
                "Length mismatch: {names} names but {prices} prices"
            ),
        }
    }
}

impl std::error::Error for CompositionError {}

/// Reasons a variant submission did not succeed
///
/// The first three are completeness errors caught before the save collaborator
/// is called. `Rejected` carries the collaborator's own message verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    MissingName,
    NoRecipesSelected,
    /// Number of ingredient rows that failed validation
    IncompleteIngredients(usize),
    Rejected(String),
    Transport(String),
}

/// Fallback when the collaborator reports failure without a message
pub const GENERIC_SAVE_FAILURE: &str = "Failed to save variant";

impl SubmitError {
    /// Whether the error was detected locally, before any save attempt
    pub fn is_completeness_error(&self) -> bool {
        matches!(
            self,
            SubmitError::MissingName
                | SubmitError::NoRecipesSelected
                | SubmitError::IncompleteIngredients(_)
        )
    }

    /// Localization key and arguments for this error
    pub fn message_key(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            SubmitError::MissingName => ("submit-missing-name", vec![]),
            SubmitError::NoRecipesSelected => ("submit-no-recipes", vec![]),
            SubmitError::IncompleteIngredients(count) => (
                "submit-incomplete-ingredients",
                vec![("count", count.to_string())],
            ),
            SubmitError::Rejected(reason) => ("submit-rejected", vec![("reason", reason.clone())]),
            SubmitError::Transport(reason) => {
                ("submit-transport", vec![("reason", reason.clone())])
            }
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::MissingName => write!(f, "Variant name is required"),
            SubmitError::NoRecipesSelected => write!(f, "Select at least one recipe"),
            SubmitError::IncompleteIngredients(1) => {
                write!(f, "1 ingredient is incomplete")
            }
            SubmitError::IncompleteIngredients(count) => {
                write!(f, "{count} ingredients are incomplete")
            }
            SubmitError::Rejected(reason) => write!(f, "{reason}"),
            SubmitError::Transport(reason) => write!(f, "Could not reach backend: {reason}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<anyhow::Error> for SubmitError {
    fn from(err: anyhow::Error) -> Self {
        SubmitError::Transport(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_error_display() {
        let err = CompositionError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Index 4 out of range for list of 2");

        let err = CompositionError::LengthMismatch { names: 3, prices: 2 };
        assert_eq!(err.to_string(), "Length mismatch: 3 names but 2 prices");
    }

    #[test]
    fn test_submit_error_display() {
        assert_eq!(
            SubmitError::IncompleteIngredients(1).to_string(),
            "1 ingredient is incomplete"
        );
        assert_eq!(
            SubmitError::IncompleteIngredients(3).to_string(),
            "3 ingredients are incomplete"
        );
        assert_eq!(
            SubmitError::Rejected("Duplicate variant name".to_string()).to_string(),
            "Duplicate variant name"
        );
    }

    #[test]
    fn test_completeness_classification() {
        assert!(SubmitError::MissingName.is_completeness_error());
        assert!(SubmitError::IncompleteIngredients(2).is_completeness_error());
        assert!(!SubmitError::Rejected("nope".into()).is_completeness_error());
        assert!(!SubmitError::Transport("down".into()).is_completeness_error());
    }

    #[test]
    fn test_from_anyhow() {
        let err: SubmitError = anyhow::anyhow!("connection refused").into();
        match err {
            SubmitError::Transport(msg) => assert!(msg.contains("connection refused")),
            _ => panic!("Expected Transport"),
        }
    }
}
