//! Compiles a query and its options into a wire request document

use super::options::SearchOptions;
use crate::error::{Result, SearchError};
use crate::query::QueryClause;
use crate::DEFAULT_PAGE_SIZE;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// A compiled search, ready to hand to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Target index / collection
    pub collection: String,
    /// Request body in the engine's search DSL
    pub body: Value,
}

impl SearchRequest {
    /// Endpoint path relative to the engine base URL
    pub fn path(&self) -> String {
        format!("{}/_search", self.collection)
    }

    /// Serialized body. Object keys are ordered, so equal requests produce
    /// identical bytes.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.body)
    }
}

/// A collection name must stay a single URL path segment.
fn check_collection(collection: &str) -> Result<()> {
    if collection.is_empty() {
        return Err(SearchError::validation("collection name is empty"));
    }
    if collection == "." || collection == ".." {
        return Err(SearchError::validation(format!(
            "invalid collection name `{}`",
            collection
        )));
    }
    if let Some(c) = collection.chars().find(|&c| {
        matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace() || c.is_control()
    }) {
        return Err(SearchError::validation(format!(
            "collection name `{}` contains forbidden character {:?}",
            collection, c
        )));
    }
    Ok(())
}

/// Translates [`QueryClause`] + [`SearchOptions`] into a [`SearchRequest`]
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    default_size: i64,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used when the options leave it unset
    pub fn with_default_size(mut self, size: i64) -> Self {
        self.default_size = size;
        self
    }

    pub fn default_size(&self) -> i64 {
        self.default_size
    }

    /// Build the request document.
    ///
    /// Fails with [`SearchError::Validation`] on an empty or unsafe collection
    /// name (`/`, `\`, `?`, `#`, whitespace, `.` or `..`) or a negative
    /// `from` / `size`, and with [`SearchError::Config`] when more
    /// than one suggestion is requested or two aggregations share a name.
    pub fn build(
        &self,
        query: &QueryClause,
        options: &SearchOptions,
        collection: &str,
    ) -> Result<SearchRequest> {
        let collection = collection.trim();
        check_collection(collection)?;
        if options.from < 0 {
            return Err(SearchError::validation(format!(
                "from must not be negative, got {}",
                options.from
            )));
        }
        let size = options.size.unwrap_or(self.default_size);
        if size < 0 {
            return Err(SearchError::validation(format!(
                "size must not be negative, got {}",
                size
            )));
        }
        if options.suggestions.len() > 1 {
            return Err(SearchError::config(format!(
                "only one suggestion per request is supported, got {}",
                options.suggestions.len()
            )));
        }
        let mut seen = HashSet::new();
        for agg in &options.aggregations {
            if !seen.insert(agg.name.as_str()) {
                return Err(SearchError::config(format!(
                    "duplicate aggregation name `{}`",
                    agg.name
                )));
            }
        }

        let mut body = json!({
            "query": query.to_document(),
            "from": options.from,
            "size": size,
        });

        if let Some(sort) = Self::sort_argument(options) {
            body["sort"] = sort;
        }
        if let Some(highlight) = Self::highlight_argument(options) {
            body["highlight"] = highlight;
        }
        if let Some(aggs) = Self::aggs_argument(options) {
            body["aggs"] = aggs;
        }
        if let Some(suggest) = Self::suggest_argument(options) {
            body["suggest"] = suggest;
        }

        Ok(SearchRequest {
            collection: collection.to_string(),
            body,
        })
    }

    fn sort_argument(options: &SearchOptions) -> Option<Value> {
        if options.sort.is_empty() {
            return None;
        }
        Some(Value::Array(
            options
                .sort
                .iter()
                .map(|s| json!({ s.field.as_str(): { "order": s.order.as_str() } }))
                .collect(),
        ))
    }

    fn highlight_argument(options: &SearchOptions) -> Option<Value> {
        if options.highlight_fields.is_empty() {
            return None;
        }
        let fields: Map<String, Value> = options
            .highlight_fields
            .iter()
            .map(|field| (field.clone(), json!({ "require_field_match": false })))
            .collect();
        Some(json!({ "fields": fields }))
    }

    fn aggs_argument(options: &SearchOptions) -> Option<Value> {
        if options.aggregations.is_empty() {
            return None;
        }
        let aggs: Map<String, Value> = options
            .aggregations
            .iter()
            .map(|agg| {
                (
                    agg.name.clone(),
                    json!({ "terms": { "field": agg.field, "size": agg.size } }),
                )
            })
            .collect();
        Some(Value::Object(aggs))
    }

    fn suggest_argument(options: &SearchOptions) -> Option<Value> {
        let suggestion = options.suggestion()?;
        Some(json!({
            suggestion.name.as_str(): {
                "prefix": suggestion.prefix,
                "completion": {
                    "field": suggestion.field,
                    "skip_duplicates": suggestion.skip_duplicates,
                    "size": suggestion.size,
                }
            }
        }))
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
