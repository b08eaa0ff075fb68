//! Services for storage and aggregation

pub mod aggregator;
pub mod repository;

pub use aggregator::Aggregator;
pub use repository::Repository;
