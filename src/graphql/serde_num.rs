//! Lenient number decoding for GraphQL payloads.
//!
//! Subgraphs return `BigInt` values as decimal strings, the backend returns
//! plain JSON numbers; both decode here.

use alloy::primitives::U256;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Unsigned(u64),
    Float(f64),
}

/// Parse a decimal (or `0x` hex) integer string.
pub fn parse_u256(value: &str) -> Result<U256, String> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(value, 10),
    };
    parsed.map_err(|e| format!("invalid integer '{}': {}", value, e))
}

/// `U256` as a decimal string.
pub mod u256 {
    use super::{parse_u256, RawNumber};
    use alloy::primitives::U256;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match RawNumber::deserialize(deserializer)? {
            RawNumber::Text(text) => parse_u256(&text).map_err(D::Error::custom),
            RawNumber::Unsigned(n) => Ok(U256::from(n)),
            RawNumber::Float(f) => Err(D::Error::custom(format!("expected integer, got {}", f))),
        }
    }
}

/// `u64` from a string or a number.
pub mod u64_lenient {
    use super::RawNumber;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match RawNumber::deserialize(deserializer)? {
            RawNumber::Text(text) => text.trim().parse().map_err(D::Error::custom),
            RawNumber::Unsigned(n) => Ok(n),
            RawNumber::Float(f) => Err(D::Error::custom(format!("expected integer, got {}", f))),
        }
    }
}

/// `f64` from a string, a number or `null` (zero).
pub mod f64_lenient {
    use super::RawNumber;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<RawNumber>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(RawNumber::Text(text)) => text.trim().parse().map_err(D::Error::custom),
            Some(RawNumber::Unsigned(n)) => Ok(n as f64),
            Some(RawNumber::Float(f)) => Ok(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "u256")]
        amount: U256,
        #[serde(with = "u64_lenient")]
        time: u64,
        #[serde(with = "f64_lenient")]
        total: f64,
    }

    #[test]
    fn test_decodes_strings_and_numbers() {
        let sample: Sample =
            serde_json::from_str(r#"{"amount":"1000000000000000000000","time":"1700000000","total":12.5}"#)
                .unwrap();
        assert_eq!(sample.amount, U256::from(10u64).pow(U256::from(21u64)));
        assert_eq!(sample.time, 1_700_000_000);
        assert_eq!(sample.total, 12.5);

        let sample: Sample = serde_json::from_str(r#"{"amount":42,"time":7,"total":null}"#).unwrap();
        assert_eq!(sample.amount, U256::from(42u64));
        assert_eq!(sample.total, 0.0);
    }

    #[test]
    fn test_max_uint_option() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_u256(&max).unwrap(), U256::MAX);
        assert_eq!(parse_u256("0xff").unwrap(), U256::from(255u64));
        assert!(parse_u256("12abc").is_err());
    }

    #[test]
    fn test_serializes_u256_as_decimal_string() {
        let sample = Sample {
            amount: U256::from(5u64),
            time: 1,
            total: 1.0,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["amount"], "5");
    }
}
