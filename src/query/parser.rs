//! Compact textual syntax for clauses and search directives
//!
//! Used by the command line front end:
//! - Terms and matches: `city=Beijing`
//! - Filters: `price<=250`, `price>=100`, `price:100..250`, `brand=Hilton`
//! - Sort keys: `price`, `price:desc`
//! - Aggregations: `brand`, `brand:brand.keyword:20`
//! - Suggestions: `suggestions:suggestion:h`, `suggestions:suggestion:h:5`

use super::QueryClause;
use crate::search::{SortOrder, SortSpec, SuggestionSpec, TermsAggregation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Default bucket / option count when a spec does not give one
const DEFAULT_TOP_N: usize = 10;

static FIELD_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^<>=:\s]+)\s*=\s*(.*?)\s*$").unwrap());

static FILTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^<>=:\s]+)\s*(<=|>=|=|:)\s*(.*?)\s*$").unwrap());

/// A compact spec could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} `{input}`: {reason}")]
pub struct ClauseSyntaxError {
    pub kind: &'static str,
    pub input: String,
    pub reason: String,
}

impl ClauseSyntaxError {
    fn new(kind: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Interpret a literal as a JSON scalar: booleans, integers, floats, else text
pub fn parse_scalar(raw: &str) -> Value {
    let raw = raw.trim();
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }
    Value::String(raw.to_string())
}

fn split_field_value<'a>(
    kind: &'static str,
    input: &'a str,
) -> Result<(&'a str, &'a str), ClauseSyntaxError> {
    let caps = FIELD_VALUE_RE
        .captures(input)
        .ok_or_else(|| ClauseSyntaxError::new(kind, input, "expected field=value"))?;
    let field = caps.get(1).map_or("", |m| m.as_str());
    let value = caps.get(2).map_or("", |m| m.as_str());
    if value.is_empty() {
        return Err(ClauseSyntaxError::new(kind, input, "missing value"));
    }
    Ok((field, value))
}

/// Parse `field=value` into a term clause
pub fn parse_term(input: &str) -> Result<QueryClause, ClauseSyntaxError> {
    let (field, value) = split_field_value("term", input)?;
    Ok(QueryClause::term(field, parse_scalar(value)))
}

/// Parse `field=text` into a full-text match clause
pub fn parse_match(input: &str) -> Result<QueryClause, ClauseSyntaxError> {
    let (field, text) = split_field_value("match", input)?;
    Ok(QueryClause::match_text(field, text))
}

/// Parse a filter: a term (`f=v`), a one-sided range (`f<=v`, `f>=v`) or a
/// closed / half-open range (`f:a..b`, `f:..b`, `f:a..`)
pub fn parse_filter(input: &str) -> Result<QueryClause, ClauseSyntaxError> {
    let caps = FILTER_RE.captures(input).ok_or_else(|| {
        ClauseSyntaxError::new("filter", input, "expected field, operator, value")
    })?;
    let field = caps.get(1).map_or("", |m| m.as_str());
    let op = caps.get(2).map_or("", |m| m.as_str());
    let value = caps.get(3).map_or("", |m| m.as_str());

    if value.is_empty() {
        return Err(ClauseSyntaxError::new("filter", input, "missing value"));
    }

    let clause = match op {
        "=" => QueryClause::term(field, parse_scalar(value)),
        "<=" => QueryClause::range(field).lte(parse_scalar(value)).build(),
        ">=" => QueryClause::range(field).gte(parse_scalar(value)).build(),
        _ => {
            let (low, high) = value
                .split_once("..")
                .ok_or_else(|| ClauseSyntaxError::new("filter", input, "expected low..high"))?;
            let (low, high) = (low.trim(), high.trim());
            if low.is_empty() && high.is_empty() {
                return Err(ClauseSyntaxError::new("filter", input, "range has no bounds"));
            }
            let mut range = QueryClause::range(field);
            if !low.is_empty() {
                range = range.gte(parse_scalar(low));
            }
            if !high.is_empty() {
                range = range.lte(parse_scalar(high));
            }
            range.build()
        }
    };
    Ok(clause)
}

/// Parse `field` or `field:asc|desc`
pub fn parse_sort(input: &str) -> Result<SortSpec, ClauseSyntaxError> {
    let (field, order) = match input.split_once(':') {
        Some((field, order)) => (field.trim(), order.trim()),
        None => (input.trim(), "asc"),
    };
    if field.is_empty() {
        return Err(ClauseSyntaxError::new("sort", input, "missing field"));
    }
    let order = match order.to_ascii_lowercase().as_str() {
        "asc" => SortOrder::Asc,
        "desc" => SortOrder::Desc,
        other => {
            return Err(ClauseSyntaxError::new(
                "sort",
                input,
                format!("unknown order `{}`", other),
            ))
        }
    };
    Ok(SortSpec::new(field, order))
}

fn parse_top_n(
    kind: &'static str,
    input: &str,
    raw: Option<&str>,
) -> Result<usize, ClauseSyntaxError> {
    match raw {
        None => Ok(DEFAULT_TOP_N),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| {
                ClauseSyntaxError::new(kind, input, format!("`{}` is not a size", raw))
            }),
    }
}

/// Parse `field` (named after the field) or `name:field[:size]`
pub fn parse_aggregation(input: &str) -> Result<TermsAggregation, ClauseSyntaxError> {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();
    let (name, field, size) = match parts.as_slice() {
        [field] => (*field, *field, None),
        [name, field] => (*name, *field, None),
        [name, field, size] => (*name, *field, Some(*size)),
        _ => {
            return Err(ClauseSyntaxError::new(
                "aggregation",
                input,
                "expected name:field[:size]",
            ))
        }
    };
    if name.is_empty() || field.is_empty() {
        return Err(ClauseSyntaxError::new("aggregation", input, "missing name or field"));
    }
    let size = parse_top_n("aggregation", input, size)?;
    Ok(TermsAggregation::new(name, field, size))
}

/// Parse `name:field:prefix[:size]`
pub fn parse_suggestion(input: &str) -> Result<SuggestionSpec, ClauseSyntaxError> {
    let parts: Vec<&str> = input.splitn(4, ':').collect();
    let (name, field, prefix, size) = match parts.as_slice() {
        [name, field, prefix] => (*name, *field, *prefix, None),
        [name, field, prefix, size] => (*name, *field, *prefix, Some(*size)),
        _ => {
            return Err(ClauseSyntaxError::new(
                "suggestion",
                input,
                "expected name:field:prefix[:size]",
            ))
        }
    };
    let (name, field) = (name.trim(), field.trim());
    if name.is_empty() || field.is_empty() || prefix.is_empty() {
        return Err(ClauseSyntaxError::new(
            "suggestion",
            input,
            "missing name, field or prefix",
        ));
    }
    let size = parse_top_n("suggestion", input, size)?;
    Ok(SuggestionSpec::new(name, field, prefix).with_size(size))
}
