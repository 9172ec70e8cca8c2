//! Form validation for the issue edit model.

use crate::detail::IssueDraft;

/// Result of form validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether validation passed
    pub is_valid: bool,
    /// Error message if validation failed
    pub error: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// Create a failed validation result with an error message
    pub fn failure(message: String) -> Self {
        Self {
            is_valid: false,
            error: Some(message),
        }
    }
}

/// Validator for the issue edit form
pub struct DraftValidator;

impl DraftValidator {
    /// Validate a draft before it is sent to the service.
    ///
    /// Enum-valued fields are valid by construction; only the title needs
    /// checking.
    pub fn validate(draft: &IssueDraft) -> ValidationResult {
        if draft.title.trim().is_empty() {
            return ValidationResult::failure("Title cannot be empty".to_string());
        }
        ValidationResult::success()
    }
}
