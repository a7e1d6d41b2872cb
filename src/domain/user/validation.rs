//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username cannot contain whitespace")]
    UsernameContainsWhitespace,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Student number is required for student accounts")]
    EmptyStudentNumber,
}

/// Validate a username: non-empty, no whitespace. Comparison everywhere
/// else is exact and case-sensitive, so no normalization happens here.
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().any(char::is_whitespace) {
        return Err(UserValidationError::UsernameContainsWhitespace);
    }

    Ok(())
}

/// Validate a password: the legacy store only requires it to be present.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

/// Validate a student number: required and non-blank for students.
pub fn validate_student_number(student_number: &str) -> Result<(), UserValidationError> {
    if student_number.trim().is_empty() {
        return Err(UserValidationError::EmptyStudentNumber);
    }

    Ok(())
}
