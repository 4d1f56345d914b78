//! Result types for decoded searches

mod types;

pub use types::*;
