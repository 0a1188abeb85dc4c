//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and value ranges (timeouts > 0, confirmations >= 1)
//! - Reject zero fallback contract addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MarketConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::MarketConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = url::Url::parse(value) {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("invalid URL '{}': {}", value, e),
        });
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: u64) {
    if value == 0 {
        errors.push(ValidationError {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MarketConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let endpoints = &config.endpoints;
    check_url(&mut errors, "endpoints.hub_url", &endpoints.hub_url);
    check_url(&mut errors, "endpoints.backend_url", &endpoints.backend_url);
    check_url(&mut errors, "endpoints.explorer_url", &endpoints.explorer_url);
    check_url(&mut errors, "endpoints.default_rpc_url", &endpoints.default_rpc_url);
    check_url(&mut errors, "defaults.graph_endpoint", &config.defaults.graph_endpoint);

    if config.defaults.merkle_address.is_zero() {
        errors.push(ValidationError {
            field: "defaults.merkle_address".to_string(),
            message: "zero address not allowed".to_string(),
        });
    }
    if config.defaults.incentive_address.is_zero() {
        errors.push(ValidationError {
            field: "defaults.incentive_address".to_string(),
            message: "zero address not allowed".to_string(),
        });
    }

    for (i, entry) in config.chains.iter().enumerate() {
        check_positive(&mut errors, &format!("chains[{}].chain_id", i), entry.chain_id);
        if let Some(url) = &entry.rpc_url {
            check_url(&mut errors, &format!("chains[{}].rpc_url", i), url);
        }
        if let Some(url) = &entry.graph_endpoint {
            check_url(&mut errors, &format!("chains[{}].graph_endpoint", i), url);
        }
    }

    let chain = &config.blockchain;
    if let Some(rpc_url) = &chain.rpc_url {
        check_url(&mut errors, "blockchain.rpc_url", rpc_url);
    }
    for (i, url) in chain.failover_urls.iter().enumerate() {
        check_url(&mut errors, &format!("blockchain.failover_urls[{}]", i), url);
    }
    check_positive(&mut errors, "blockchain.chain_id", chain.chain_id);
    check_positive(&mut errors, "blockchain.rpc_timeout_secs", chain.rpc_timeout_secs);
    check_positive(&mut errors, "blockchain.confirmation_blocks", chain.confirmation_blocks);
    check_positive(&mut errors, "blockchain.tx_timeout_secs", chain.tx_timeout_secs);
    check_positive(&mut errors, "http.request_timeout_secs", config.http.request_timeout_secs);

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level".to_string(),
            message: format!("unknown level '{}'", config.observability.log_level),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MarketConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MarketConfig::default();
        config.endpoints.hub_url = "not a url".to_string();
        config.blockchain.rpc_timeout_secs = 0;
        config.blockchain.failover_urls.push("::bad".to_string());
        config.defaults.merkle_address = Address::ZERO;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "endpoints.hub_url",
                "defaults.merkle_address",
                "blockchain.failover_urls[0]",
                "blockchain.rpc_timeout_secs",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError {
            field: "http.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "http.request_timeout_secs: must be greater than zero"
        );
    }
}
