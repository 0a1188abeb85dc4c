//! Metrics collection.
//!
//! # Metrics
//! - `incentives_rpc_calls_total` (counter): read calls by operation, outcome
//! - `incentives_transactions_total` (counter): sent transactions by kind, outcome
//! - `incentives_graphql_requests_total` (counter): queries by endpoint, outcome
//! - `incentives_token_cache_size` (gauge): cached token metadata entries

fn outcome(success: bool) -> &'static str {
    if success {
        "ok"
    } else {
        "error"
    }
}

pub fn record_rpc_call(op: &'static str, success: bool) {
    ::metrics::counter!("incentives_rpc_calls_total", "op" => op, "outcome" => outcome(success))
        .increment(1);
}

pub fn record_transaction(kind: &'static str, success: bool) {
    ::metrics::counter!(
        "incentives_transactions_total",
        "kind" => kind,
        "outcome" => outcome(success)
    )
    .increment(1);
}

pub fn record_graphql_request(endpoint: &'static str, success: bool) {
    ::metrics::counter!(
        "incentives_graphql_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome(success)
    )
    .increment(1);
}

pub fn record_token_cache_size(size: usize) {
    ::metrics::gauge!("incentives_token_cache_size").set(size as f64);
}
