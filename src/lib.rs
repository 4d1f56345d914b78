//! searchdsl-rs: typed search requests and responses for Elasticsearch-compatible engines
//!
//! Build a [`QueryClause`], describe paging, sorting, highlighting,
//! aggregations and suggestions with [`SearchOptions`], and let a
//! [`SearchClient`] compile, send and decode the search:
//!
//! ```no_run
//! use searchdsl_rs::network::HttpTransport;
//! use searchdsl_rs::query::{BoolQuery, QueryClause};
//! use searchdsl_rs::search::{SearchClient, SearchOptions, SortOrder};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = SearchClient::new(HttpTransport::new("http://127.0.0.1:9200")?);
//! let query: QueryClause = BoolQuery::new()
//!     .must(QueryClause::term("city", "Beijing"))
//!     .filter(QueryClause::range("price").lte(250))
//!     .into();
//! let options = SearchOptions::new()
//!     .with_size(5)
//!     .with_sort("price", SortOrder::Asc);
//!
//! let result = client.execute(&query, &options, "hotel").await?;
//! println!("{} hits", result.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod network;
pub mod query;
pub mod results;
pub mod search;

pub use config::Settings;
pub use error::{SearchError, TransportError};
pub use query::QueryClause;
pub use results::{Bucket, HitDoc, SearchResult};
pub use search::{SearchClient, SearchOptions};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page size used when a search does not set one
pub const DEFAULT_PAGE_SIZE: i64 = 10;
