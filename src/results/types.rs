//! Result type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Decoded outcome of one search call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of matching documents reported by the engine
    pub total: u64,
    /// False when `total` is only a lower bound
    pub total_is_exact: bool,
    /// Hits of the requested page, in engine order
    pub hits: Vec<HitDoc>,
    /// Buckets per aggregation name, in engine order
    #[serde(default)]
    pub aggregations: BTreeMap<String, Vec<Bucket>>,
    /// Option texts per suggestion name, in engine order
    #[serde(default)]
    pub suggestions: BTreeMap<String, Vec<String>>,
}

impl SearchResult {
    /// Buckets of a named aggregation
    pub fn buckets(&self, name: &str) -> &[Bucket] {
        self.aggregations.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Option texts of a named suggestion
    pub fn suggestion_texts(&self, name: &str) -> &[String] {
        self.suggestions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.aggregations.is_empty() && self.suggestions.is_empty()
    }
}

/// A single hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitDoc {
    /// Document id
    pub id: Option<String>,
    /// Relevance score; absent when sorting by field
    pub score: Option<f64>,
    /// Stored source document
    pub raw_fields: Map<String, Value>,
    /// First highlight fragment per field
    #[serde(default)]
    pub highlighted: BTreeMap<String, String>,
}

impl HitDoc {
    /// Value of `field` as it should be displayed: the highlight fragment
    /// when there is one, else the raw source value.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self.highlighted.get(name) {
            Some(fragment) => Some(Value::String(fragment.clone())),
            None => self.raw_fields.get(name).cloned(),
        }
    }

    /// Source document with highlighted fields substituted
    pub fn rendered(&self) -> Map<String, Value> {
        let mut fields = self.raw_fields.clone();
        for (name, fragment) in &self.highlighted {
            fields.insert(name.clone(), Value::String(fragment.clone()));
        }
        fields
    }

    /// Deserialize the rendered document into a caller type
    pub fn render_as<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.rendered()))
    }
}

/// One terms-aggregation bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

impl Bucket {
    pub fn new(key: impl Into<String>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
        }
    }
}
