//! Wire shapes of the engine's search response.
//!
//! Only the parts the mapper reads are modelled; unknown keys are ignored.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsSection,
    #[serde(default)]
    pub aggregations: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub suggest: Option<HashMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct HitsSection {
    #[serde(default)]
    pub total: Option<TotalHits>,
    pub hits: Vec<Hit>,
}

/// `{ "value": N, "relation": "eq" | "gte" }`, or a bare count on older engines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Detailed {
        value: u64,
        #[serde(default)]
        relation: Option<TotalRelation>,
    },
    Count(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TotalRelation {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,

    #[serde(default)]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct TermsAggregationResult {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
pub struct Bucket {
    pub key: Value,
    #[serde(default)]
    pub key_as_string: Option<String>,
    pub doc_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SuggestEntry {
    #[serde(default)]
    pub options: Vec<SuggestOption>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestOption {
    pub text: String,
}
