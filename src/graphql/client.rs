//! Minimal GraphQL-over-HTTP client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::metrics;

/// Errors from a GraphQL round trip.
#[derive(Debug, Error)]
pub enum GraphQlError {
    /// The request never produced a response.
    #[error("GraphQL request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx HTTP status.
    #[error("GraphQL endpoint {endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Body was not a GraphQL envelope of the expected shape.
    #[error("GraphQL response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server reported errors for the query.
    #[error("GraphQL query failed: {0}")]
    Query(String),

    /// Neither `data` nor `errors` were present.
    #[error("GraphQL response had no data")]
    MissingData,
}

pub type GraphQlResult<T> = Result<T, GraphQlError>;

#[derive(Serialize)]
struct Request<'a, V: Serialize> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Client bound to one GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    /// Short name for logs and metrics (`hub`, `subgraph`, `backend`).
    name: &'static str,
}

impl GraphQlClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, name: &'static str) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            name,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `document` with `variables` and decode the `data` payload.
    pub async fn query<V, T>(&self, document: &str, variables: &V) -> GraphQlResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let result = self.execute(document, variables).await;
        metrics::record_graphql_request(self.name, result.is_ok());
        if let Err(e) = &result {
            tracing::debug!(endpoint = %self.endpoint, name = self.name, error = %e, "GraphQL query failed");
        }
        result
    }

    async fn execute<V, T>(&self, document: &str, variables: &V) -> GraphQlResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let transport = |source| GraphQlError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&Request {
                query: document,
                variables,
            })
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(GraphQlError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(GraphQlError::Query(messages.join("; ")));
        }
        envelope.data.ok_or(GraphQlError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let vars = serde_json::json!({ "id": "0x01" });
        let body = serde_json::to_value(Request {
            query: "query { x }",
            variables: &vars,
        })
        .unwrap();
        assert_eq!(body["query"], "query { x }");
        assert_eq!(body["variables"]["id"], "0x01");
    }

    #[test]
    fn test_envelope_with_errors() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"data":null,"errors":[{"message":"boom"}]}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "boom");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let client = GraphQlClient::new(reqwest::Client::new(), "http://127.0.0.1:1/graphql", "test");
        let err = client
            .query::<_, serde_json::Value>("query { x }", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphQlError::Transport { .. }));
    }
}
