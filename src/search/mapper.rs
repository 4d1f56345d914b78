//! Decodes raw response documents into [`SearchResult`]s

use super::options::SearchOptions;
use super::wire;
use crate::error::{Result, SearchError};
use crate::results::{Bucket, HitDoc, SearchResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maps the engine's response document onto typed results.
///
/// `hits` and `hits.hits` are required. Highlights, aggregations and
/// suggestions are optional and decode to empty maps when missing.
pub struct ResponseMapper;

impl ResponseMapper {
    /// Decode `response`, which was produced for a request built from `options`
    pub fn decode(response: Value, options: &SearchOptions) -> Result<SearchResult> {
        let response: wire::SearchResponse = serde_json::from_value(response)
            .map_err(|e| SearchError::decode(format!("search response: {}", e)))?;

        let hits: Vec<HitDoc> = response.hits.hits.into_iter().map(Self::hit).collect();

        let (total, total_is_exact) = match response.hits.total {
            Some(wire::TotalHits::Detailed { value, relation }) => {
                (value, relation != Some(wire::TotalRelation::Gte))
            }
            Some(wire::TotalHits::Count(value)) => (value, true),
            // Engine was asked not to track totals; the page end is a lower bound
            None if hits.is_empty() => (0, false),
            None => (options.from.max(0) as u64 + hits.len() as u64, false),
        };

        let aggregations = Self::aggregations(response.aggregations, options)?;
        let suggestions = Self::suggestions(response.suggest, options)?;

        Ok(SearchResult {
            total,
            total_is_exact,
            hits,
            aggregations,
            suggestions,
        })
    }

    fn hit(hit: wire::Hit) -> HitDoc {
        let highlighted = hit
            .highlight
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(field, fragments)| {
                // Only the first fragment is kept
                fragments.into_iter().next().map(|first| (field, first))
            })
            .collect();

        HitDoc {
            id: hit.id,
            score: hit.score,
            raw_fields: hit.source.unwrap_or_default(),
            highlighted,
        }
    }

    fn aggregations(
        section: Option<std::collections::HashMap<String, Value>>,
        options: &SearchOptions,
    ) -> Result<BTreeMap<String, Vec<Bucket>>> {
        let mut section = section.unwrap_or_default();
        let mut decoded = BTreeMap::new();

        for requested in &options.aggregations {
            let Some(raw) = section.remove(&requested.name) else {
                continue;
            };
            let agg: wire::TermsAggregationResult =
                serde_json::from_value(raw).map_err(|e| {
                    SearchError::decode(format!("aggregation `{}`: {}", requested.name, e))
                })?;
            let buckets = agg.buckets.into_iter().map(Self::bucket).collect();
            decoded.insert(requested.name.clone(), buckets);
        }

        Ok(decoded)
    }

    fn bucket(bucket: wire::Bucket) -> Bucket {
        let key = match (bucket.key_as_string, bucket.key) {
            (Some(key), _) => key,
            (None, Value::String(key)) => key,
            (None, other) => other.to_string(),
        };
        Bucket::new(key, bucket.doc_count)
    }

    fn suggestions(
        section: Option<std::collections::HashMap<String, Value>>,
        options: &SearchOptions,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let mut decoded = BTreeMap::new();
        let (Some(requested), Some(mut section)) = (options.suggestion(), section) else {
            return Ok(decoded);
        };
        let Some(raw) = section.remove(&requested.name) else {
            return Ok(decoded);
        };

        let entries: Vec<wire::SuggestEntry> = serde_json::from_value(raw).map_err(|e| {
            SearchError::decode(format!("suggestion `{}`: {}", requested.name, e))
        })?;
        let texts = entries
            .into_iter()
            .flat_map(|entry| entry.options)
            .map(|option| option.text)
            .collect();
        decoded.insert(requested.name.clone(), texts);

        Ok(decoded)
    }
}
