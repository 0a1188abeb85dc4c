//! Display helpers shared by the market and the CLI.
//!
//! Everything here is pure: no I/O, no allocation beyond the returned
//! strings. Token amounts travel as `U256` base units until they reach
//! this module.

pub mod numbers;
pub mod text;
pub mod units;

pub use numbers::{add_incentive_fee, commify, decimal_places};
pub use text::{shorten, shorten_address, ShortenLimit};
pub use units::{format_token_amount, parse_token_amount, token_amount_to_f64, AmountError};
