//! Lending engine infrastructure

mod repository;
mod service;

pub use repository::DocumentTransactionRepository;
pub use service::LendingService;
