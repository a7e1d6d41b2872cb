//! Book validation utilities

use thiserror::Error;

/// Errors that can occur during book validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookValidationError {
    #[error("ISBN cannot be empty")]
    EmptyIsbn,

    #[error("Title cannot be empty")]
    EmptyTitle,
}

/// Validate an ISBN. The store treats it as an opaque unique key, so the
/// only rule is that it is non-blank.
pub fn validate_isbn(isbn: &str) -> Result<(), BookValidationError> {
    if isbn.trim().is_empty() {
        return Err(BookValidationError::EmptyIsbn);
    }

    Ok(())
}

/// Validate a title: non-blank (titles participate in lending lookups).
pub fn validate_title(title: &str) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn() {
        assert!(validate_isbn("978-0-13-468599-1").is_ok());
        assert_eq!(validate_isbn("  "), Err(BookValidationError::EmptyIsbn));
    }

    #[test]
    fn test_title() {
        assert!(validate_title("The Go Programming Language").is_ok());
        assert_eq!(validate_title(""), Err(BookValidationError::EmptyTitle));
    }
}
