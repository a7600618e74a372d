use serde::Serialize;
use std::fmt;

/// Message attached to a failed email uniqueness check.
pub const DUPLICATED_MESSAGE: &str = "already exists in the database.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationKind {
    Required,
    Duplicated,
}

/// A single failed constraint on one field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: &'static str,
    pub kind: ValidationKind,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn required(path: &'static str) -> Self {
        Self { path, kind: ValidationKind::Required, message: format!("Path `{path}` is required.") }
    }

    #[must_use]
    pub fn duplicated(path: &'static str) -> Self {
        Self { path, kind: ValidationKind::Duplicated, message: DUPLICATED_MESSAGE.to_string() }
    }
}

/// All field failures collected while validating a record before save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn has_kind(&self, kind: ValidationKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    /// Converts the collection into a result, failing when any error was recorded.
    ///
    /// # Errors
    /// Returns `self` if at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User validation failed")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{sep}{}: {}", error.path, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicated_error_shape() {
        let err = FieldError::duplicated("email");
        assert_eq!(err.kind, ValidationKind::Duplicated);
        assert_eq!(err.message, "already exists in the database.");
    }

    #[test]
    fn test_display_lists_every_field() {
        let mut errors = ValidationErrors::default();
        errors.push(FieldError::required("name"));
        errors.push(FieldError::duplicated("email"));

        assert_eq!(
            errors.to_string(),
            "User validation failed: name: Path `name` is required., email: already exists in the database."
        );
        assert!(errors.has_kind(ValidationKind::Duplicated));
        assert_eq!(errors.errors()[0].kind, ValidationKind::Required);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::default().into_result().is_ok());
        assert!(ValidationErrors::from(FieldError::required("password")).into_result().is_err());
    }

    #[test]
    fn test_kind_serializes_as_code() {
        let json = serde_json::to_value(FieldError::duplicated("email")).unwrap();
        assert_eq!(json["kind"], "DUPLICATED");
        assert_eq!(json["path"], "email");
    }
}
