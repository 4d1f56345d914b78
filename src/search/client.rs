//! Search execution

use super::builder::RequestBuilder;
use super::mapper::ResponseMapper;
use super::options::SearchOptions;
use crate::error::{Result, SearchError, TransportError};
use crate::network::Transport;
use crate::query::QueryClause;
use crate::results::SearchResult;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Builds, sends and decodes searches over an injected [`Transport`].
///
/// The client holds no mutable state, so one instance can serve concurrent
/// callers as long as the transport allows it. Each call makes exactly one
/// transport request and never retries.
pub struct SearchClient<T> {
    transport: T,
    builder: RequestBuilder,
    timeout: Option<Duration>,
}

impl<T: Transport> SearchClient<T> {
    /// Create a client with the default request builder and no timeout
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            builder: RequestBuilder::new(),
            timeout: None,
        }
    }

    /// Replace the request builder
    pub fn with_builder(mut self, builder: RequestBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Bound the transport call; expiry surfaces as [`TransportError::Timeout`]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Execute a search against `collection`
    pub async fn execute(
        &self,
        query: &QueryClause,
        options: &SearchOptions,
        collection: &str,
    ) -> Result<SearchResult> {
        self.execute_until(query, options, collection, futures::future::pending())
            .await
    }

    /// Execute a search, abandoning it with [`SearchError::Cancelled`] if
    /// `cancel` completes before the transport answers. No partial result is
    /// returned on cancellation.
    pub async fn execute_until<C>(
        &self,
        query: &QueryClause,
        options: &SearchOptions,
        collection: &str,
        cancel: C,
    ) -> Result<SearchResult>
    where
        C: Future<Output = ()>,
    {
        let request = self.builder.build(query, options, collection)?;

        debug!(
            "Sending search to {} (from={}, size={})",
            request.collection, request.body["from"], request.body["size"]
        );

        let response = tokio::select! {
            biased;
            _ = cancel => return Err(SearchError::Cancelled),
            response = self.send(&request) => response?,
        };

        let result = ResponseMapper::decode(response, options)?;

        debug!(
            "Search on {} returned {} of {} hits",
            request.collection,
            result.hits.len(),
            result.total
        );

        Ok(result)
    }

    async fn send(
        &self,
        request: &super::SearchRequest,
    ) -> std::result::Result<Value, TransportError> {
        match self.timeout {
            Some(limit) => timeout(limit, self.transport.send(request))
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => self.transport.send(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BoolQuery;
    use crate::search::{SearchRequest, SuggestionSpec, TermsAggregation};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio_test::{assert_err, assert_ok};

    /// Transport that records requests and answers with a canned document
    struct RecordingTransport {
        reply: std::result::Result<Value, u16>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl RecordingTransport {
        fn replying(reply: Value) -> Self {
            Self {
                reply: Ok(reply),
                delay: None,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                ..Self::replying(Value::Null)
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: &SearchRequest,
        ) -> std::result::Result<Value, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(status) => Err(TransportError::Status {
                    status: *status,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    fn hotel_response() -> Value {
        json!({
            "took": 2,
            "timed_out": false,
            "hits": {
                "total": { "value": 1, "relation": "eq" },
                "hits": [{
                    "_id": "36934",
                    "_source": { "name": "Home Inn Beijing", "price": 336 },
                    "highlight": { "name": ["<em>Home Inn</em> Beijing"] }
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let client = SearchClient::new(RecordingTransport::replying(hotel_response()));
        let query = QueryClause::match_text("all", "Home Inn");
        let options = SearchOptions::new().with_highlight("name");

        let result = assert_ok!(client.execute(&query, &options, "hotel").await);
        assert_eq!(result.total, 1);
        assert_eq!(
            result.hits[0].field("name"),
            Some(json!("<em>Home Inn</em> Beijing"))
        );

        assert_eq!(client.transport().calls(), 1);
        let requests = client.transport().requests.lock().unwrap();
        assert_eq!(requests[0].collection, "hotel");
        assert_eq!(
            requests[0].body["highlight"]["fields"]["name"]["require_field_match"],
            json!(false)
        );
    }

    #[tokio::test]
    async fn test_bool_query_is_sent_once() {
        let client = SearchClient::new(RecordingTransport::replying(hotel_response()));
        let query: QueryClause = BoolQuery::new()
            .must(QueryClause::term("city", "Beijing"))
            .filter(QueryClause::range("price").lte(250))
            .into();

        assert_ok!(client.execute(&query, &SearchOptions::new(), "hotel").await);
        assert_eq!(client.transport().calls(), 1);
        let requests = client.transport().requests.lock().unwrap();
        assert_eq!(
            requests[0].body["query"]["bool"]["filter"][0],
            json!({ "range": { "price": { "lte": 250 } } })
        );
    }

    #[tokio::test]
    async fn test_aggregation_only_search() {
        let response = json!({
            "hits": { "total": { "value": 201, "relation": "eq" }, "hits": [] },
            "aggregations": {
                "brand": { "buckets": [{ "key": "Home Inn", "doc_count": 30 }] }
            }
        });
        let client = SearchClient::new(RecordingTransport::replying(response));
        let options = SearchOptions::new()
            .with_size(0)
            .with_aggregation(TermsAggregation::new("brand", "brand", 10));

        let result = assert_ok!(
            client
                .execute(&QueryClause::match_all(), &options, "hotel")
                .await
        );
        assert!(result.hits.is_empty());
        assert!(!result.buckets("brand").is_empty());
    }

    #[tokio::test]
    async fn test_config_error_skips_transport() {
        let client = SearchClient::new(RecordingTransport::replying(hotel_response()));
        let options = SearchOptions::new()
            .with_suggestion(SuggestionSpec::new("a", "suggestion", "h"))
            .with_suggestion(SuggestionSpec::new("b", "suggestion", "r"));

        let err = assert_err!(
            client
                .execute(&QueryClause::match_all(), &options, "hotel")
                .await
        );
        assert!(matches!(err, SearchError::Config(_)));
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_error_skips_transport() {
        let client = SearchClient::new(RecordingTransport::replying(hotel_response()));

        let err = assert_err!(
            client
                .execute(
                    &QueryClause::match_all(),
                    &SearchOptions::new().with_size(-1),
                    "hotel"
                )
                .await
        );
        assert!(matches!(err, SearchError::Validation(_)));

        let err = assert_err!(
            client
                .execute(&QueryClause::match_all(), &SearchOptions::new(), "")
                .await
        );
        assert!(matches!(err, SearchError::Validation(_)));
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_surfaced_without_retry() {
        let client = SearchClient::new(RecordingTransport::failing(503));

        let err = assert_err!(
            client
                .execute(&QueryClause::match_all(), &SearchOptions::new(), "hotel")
                .await
        );
        assert!(matches!(
            err,
            SearchError::Transport(TransportError::Status { status: 503, .. })
        ));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let client = SearchClient::new(RecordingTransport::replying(json!({ "error": "boom" })));
        let err = assert_err!(
            client
                .execute(&QueryClause::match_all(), &SearchOptions::new(), "hotel")
                .await
        );
        assert!(matches!(err, SearchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let transport =
            RecordingTransport::replying(hotel_response()).delayed(Duration::from_millis(500));
        let client = SearchClient::new(transport).with_timeout(Duration::from_millis(10));

        let err = assert_err!(
            client
                .execute(&QueryClause::match_all(), &SearchOptions::new(), "hotel")
                .await
        );
        assert!(matches!(err, SearchError::Transport(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn test_cancellation() {
        let transport =
            RecordingTransport::replying(hotel_response()).delayed(Duration::from_millis(500));
        let client = SearchClient::new(transport);

        let err = assert_err!(
            client
                .execute_until(
                    &QueryClause::match_all(),
                    &SearchOptions::new(),
                    "hotel",
                    tokio::time::sleep(Duration::from_millis(10)),
                )
                .await
        );
        assert!(matches!(err, SearchError::Cancelled));
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers() {
        let client = Arc::new(SearchClient::new(RecordingTransport::replying(
            hotel_response(),
        )));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .execute(&QueryClause::match_all(), &SearchOptions::new(), "hotel")
                        .await
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result.total, 1);
        }
        assert_eq!(client.transport().calls(), 4);
    }
}
