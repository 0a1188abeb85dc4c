//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, initialised by logging.rs)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → stderr (plain or JSON lines)
//!     → any metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging with fields, never formatted secrets
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
