//! Block-explorer (Etherscan-compatible) REST client.

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("explorer returned status {0}")]
    Status(u16),

    /// `status` was `"0"` or `result` was not a list.
    #[error("explorer error: {0}")]
    Api(String),

    #[error("explorer has no source entry for {0}")]
    NotFound(Address),
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    message: String,
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(rename = "ContractName", default)]
    contract_name: String,
}

/// Client for one explorer API base URL.
#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Verified contract name of `address`. Unverified contracts come back
    /// as an empty string.
    pub async fn contract_name(&self, address: Address) -> Result<String, ExplorerError> {
        let address_param = address.to_string();
        let mut query = vec![
            ("module", "contract"),
            ("action", "getsourcecode"),
            ("address", address_param.as_str()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.as_str()));
        }

        let resp = self.http.get(&self.base_url).query(&query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExplorerError::Status(status.as_u16()));
        }

        let body: ApiResponse = resp.json().await?;
        let entries: Vec<SourceEntry> = match body.result {
            serde_json::Value::Array(_) => serde_json::from_value(body.result)
                .map_err(|e| ExplorerError::Api(e.to_string()))?,
            // Errors arrive as a string in `result`.
            serde_json::Value::String(reason) => {
                return Err(ExplorerError::Api(format!("{}: {}", body.message, reason)))
            }
            other => return Err(ExplorerError::Api(format!("unexpected result {}", other))),
        };

        let name = entries
            .into_iter()
            .next()
            .map(|entry| entry.contract_name)
            .ok_or(ExplorerError::NotFound(address))?;
        tracing::debug!(address = %address, contract_name = %name, "Resolved contract name");
        Ok(name)
    }
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry_decoding() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"status":"1","message":"OK","result":[{"SourceCode":"...","ContractName":"TetherToken"}]}"#,
        )
        .unwrap();
        let entries: Vec<SourceEntry> = serde_json::from_value(body.result).unwrap();
        assert_eq!(entries[0].contract_name, "TetherToken");
    }

    #[tokio::test]
    async fn test_unreachable_explorer() {
        let client = ExplorerClient::new(reqwest::Client::new(), "http://127.0.0.1:1/api", None);
        let err = client.contract_name(Address::ZERO).await.unwrap_err();
        assert!(matches!(err, ExplorerError::Http(_)));
    }
}
