//! Transport layer
//!
//! The search core only needs something that can deliver a request document
//! and hand back the engine's response document. [`HttpTransport`] does that
//! over HTTP; tests substitute their own.

mod client;

pub use client::HttpTransport;

use crate::error::TransportError;
use crate::search::SearchRequest;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Delivers one search request to the engine.
///
/// Connection setup, pooling and TLS belong to the implementation. Callers
/// sharing a transport across tasks require it to be safe for concurrent use.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SearchRequest) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &SearchRequest) -> Result<Value, TransportError> {
        (**self).send(request).await
    }
}
