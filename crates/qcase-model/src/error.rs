//! Error types for the domain model
//!
//! All of these are validation failures raised while constructing domain
//! values, before any store is touched.

/// Domain validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Sector string is not one of the known sectors
    #[error("unknown sector: '{0}'")]
    UnknownSector(String),

    /// Role string is not one of the known roles
    #[error("unknown role: '{0}'")]
    UnknownRole(String),

    /// Entry-point key is empty or whitespace
    #[error("entry point key must not be empty")]
    EmptyEntryPoint,

    /// Display value is empty or whitespace
    #[error("display value for entry point '{0}' must not be empty")]
    EmptyDisplayValue(String),

    /// Entry-point key is already present in the reference table
    #[error("entry point already exists: '{0}'")]
    DuplicateEntryPoint(String),

    /// Display value is already bound to another key
    #[error("display value '{value}' is already used by entry point '{key}'")]
    DuplicateDisplayValue { value: String, key: String },

    /// Entry-point key is not present in the reference table
    #[error("entry point not found: '{0}'")]
    UnknownEntryPoint(String),

    /// A required textual field is blank
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_display() {
        let err = ModelError::UnknownSector("fisheries".to_string());
        assert_eq!(err.to_string(), "unknown sector: 'fisheries'");
    }

    #[test]
    fn duplicate_display_value_names_both_sides() {
        let err = ModelError::DuplicateDisplayValue {
            value: "Port".to_string(),
            key: "sohar_port".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("'Port'"));
        assert!(text.contains("'sohar_port'"));
    }
}
