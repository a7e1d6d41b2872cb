//! Book entity, validation and repository trait

mod entity;
mod repository;
mod validation;

pub use entity::{Book, BookChanges, BookFormat, BookQuery};
pub use repository::BookRepository;
pub use validation::{validate_isbn, validate_title, BookValidationError};
