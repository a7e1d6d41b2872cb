//! Lending transaction log entity and repository trait

mod entity;
mod repository;

pub use entity::{LoanAction, Transaction};
pub use repository::TransactionRepository;
