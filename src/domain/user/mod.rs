//! User entity, validation and repository trait

mod entity;
mod repository;
mod validation;

pub use entity::{Role, RoleType, User};
pub use repository::UserRepository;
pub use validation::{
    validate_password, validate_student_number, validate_username, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
