//! Book catalog infrastructure

mod repository;
mod service;

pub use repository::DocumentBookRepository;
pub use service::CatalogService;
