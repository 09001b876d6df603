pub mod autocomplete;
pub mod config;
pub mod error;
pub mod recent;
pub mod search;
pub mod storage;

// Re-export common error type
pub use error::{Result, SearchError};
