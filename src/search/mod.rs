//! Search orchestration module
//!
//! Compiles queries into request documents, sends them through a transport
//! and maps the responses back into typed results.

mod builder;
mod client;
mod mapper;
mod options;
mod wire;

pub use builder::{RequestBuilder, SearchRequest};
pub use client::SearchClient;
pub use mapper::ResponseMapper;
pub use options::*;
