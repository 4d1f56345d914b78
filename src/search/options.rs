//! Search options: paging, sorting, highlighting, aggregations, suggestions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// Terms aggregation: the `size` most frequent values of `field`, exposed
/// under `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsAggregation {
    pub name: String,
    pub field: String,
    pub size: usize,
}

impl TermsAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            size,
        }
    }
}

/// Completion suggestion on a prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSpec {
    /// Name the options are reported under
    pub name: String,
    /// Completion field to search
    pub field: String,
    pub prefix: String,
    /// Maximum number of options
    pub size: usize,
    /// Ask the engine to drop duplicate option texts
    pub skip_duplicates: bool,
}

impl SuggestionSpec {
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            prefix: prefix.into(),
            size: 10,
            skip_duplicates: false,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }
}

/// Everything about a search besides the query itself.
///
/// `from` and `size` are signed so that out-of-range input can be reported
/// as a validation error instead of wrapping. `suggestions` holds at most one
/// entry; more are rejected when the request is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Offset of the first hit
    pub from: i64,
    /// Page size; `None` uses the builder default, `Some(0)` returns no hits
    pub size: Option<i64>,
    /// Sort keys in priority order; empty means relevance order
    pub sort: Vec<SortSpec>,
    /// Fields to highlight
    pub highlight_fields: BTreeSet<String>,
    pub aggregations: Vec<TermsAggregation>,
    pub suggestions: Vec<SuggestionSpec>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: i64) -> Self {
        self.from = from;
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(SortSpec::new(field, order));
        self
    }

    pub fn with_highlight(mut self, field: impl Into<String>) -> Self {
        self.highlight_fields.insert(field.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: TermsAggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    pub fn with_suggestion(mut self, suggestion: SuggestionSpec) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// The requested suggestion, if exactly one is present
    pub fn suggestion(&self) -> Option<&SuggestionSpec> {
        match self.suggestions.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
