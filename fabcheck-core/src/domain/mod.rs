// fabcheck-core/src/domain/mod.rs

pub mod error;
pub mod ports;
pub mod quality;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
