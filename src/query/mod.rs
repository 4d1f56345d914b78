//! Query model
//!
//! A [`QueryClause`] is a pure tree describing what to search for. Building
//! one never fails and never touches the network: values are advisory, so a
//! range with `gte > lte` is accepted here and simply matches nothing once the
//! engine evaluates it.
//!
//! ```
//! use searchdsl_rs::query::{BoolQuery, QueryClause};
//!
//! let query: QueryClause = BoolQuery::new()
//!     .must(QueryClause::term("city", "Beijing"))
//!     .filter(QueryClause::range("price").lte(250))
//!     .into();
//! ```

mod parser;

pub use parser::{
    parse_aggregation, parse_filter, parse_match, parse_scalar, parse_sort, parse_suggestion,
    parse_term, ClauseSyntaxError,
};

use serde_json::{json, Map, Value};

/// A node of the query tree
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryClause {
    /// Matches every document
    #[default]
    MatchAll,
    /// Exact match on a non-analyzed field
    Term { field: String, value: Value },
    /// Full-text match on an analyzed field
    Match { field: String, text: String },
    /// Bounded match; a missing bound is open
    Range {
        field: String,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Boolean composition. Empty lists impose no constraint.
    Bool {
        must: Vec<QueryClause>,
        filter: Vec<QueryClause>,
    },
}

impl QueryClause {
    pub fn match_all() -> Self {
        Self::MatchAll
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn match_text(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Start a range clause on `field`; see [`RangeQuery`]
    pub fn range(field: impl Into<String>) -> RangeQuery {
        RangeQuery::new(field)
    }

    /// Combine scoring and filter clauses into the simplest equivalent tree:
    /// nothing matches all, a lone scoring clause stands by itself, anything
    /// else becomes a bool.
    pub fn from_parts(mut must: Vec<QueryClause>, filter: Vec<QueryClause>) -> Self {
        match (must.len(), filter.is_empty()) {
            (0, true) => Self::MatchAll,
            (1, true) => must.remove(0),
            _ => Self::Bool { must, filter },
        }
    }

    /// Check if the clause is a [`QueryClause::Bool`]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool { .. })
    }

    /// Render the clause as the engine's query DSL
    pub fn to_document(&self) -> Value {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Self::Match { field, text } => json!({ "match": { field.as_str(): text } }),
            Self::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), gte.clone());
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), lte.clone());
                }
                json!({ "range": { field.as_str(): bounds } })
            }
            Self::Bool { must, filter } => {
                let mut body = Map::new();
                if !must.is_empty() {
                    body.insert(
                        "must".to_string(),
                        Value::Array(must.iter().map(Self::to_document).collect()),
                    );
                }
                if !filter.is_empty() {
                    body.insert(
                        "filter".to_string(),
                        Value::Array(filter.iter().map(Self::to_document).collect()),
                    );
                }
                json!({ "bool": body })
            }
        }
    }
}

/// Builder for [`QueryClause::Range`]
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    field: String,
    gte: Option<Value>,
    lte: Option<Value>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            gte: None,
            lte: None,
        }
    }

    /// Lower inclusive bound
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.gte = Some(value.into());
        self
    }

    /// Upper inclusive bound
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.lte = Some(value.into());
        self
    }

    pub fn build(self) -> QueryClause {
        QueryClause::Range {
            field: self.field,
            gte: self.gte,
            lte: self.lte,
        }
    }
}

impl From<RangeQuery> for QueryClause {
    fn from(range: RangeQuery) -> Self {
        range.build()
    }
}

/// Builder for [`QueryClause::Bool`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    must: Vec<QueryClause>,
    filter: Vec<QueryClause>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scoring clause
    pub fn must(mut self, clause: impl Into<QueryClause>) -> Self {
        self.must.push(clause.into());
        self
    }

    /// Add a non-scoring clause
    pub fn filter(mut self, clause: impl Into<QueryClause>) -> Self {
        self.filter.push(clause.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.filter.is_empty()
    }

    pub fn build(self) -> QueryClause {
        QueryClause::Bool {
            must: self.must,
            filter: self.filter,
        }
    }
}

impl From<BoolQuery> for QueryClause {
    fn from(query: BoolQuery) -> Self {
        query.build()
    }
}
