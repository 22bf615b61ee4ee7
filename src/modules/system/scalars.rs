use std::fmt;

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Point in time, written as RFC 3339 text.
///
/// Backends and clients may also send whole epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub OffsetDateTime);

impl Date {
    pub fn parse_rfc3339(text: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(text, &Rfc3339).map(Self)
    }

    pub fn from_unix_millis(millis: i64) -> Result<Self, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).map(Self)
    }

    pub fn to_rfc3339(&self) -> Result<String, time::error::Format> {
        self.0.format(&Rfc3339)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

#[Scalar]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(text) => Date::parse_rfc3339(text)
                .map_err(|err| InputValueError::custom(format!("invalid date '{text}': {err}"))),
            Value::Number(number) => {
                let millis = number
                    .as_i64()
                    .ok_or_else(|| InputValueError::custom("date must be whole epoch milliseconds"))?;
                Date::from_unix_millis(millis).map_err(InputValueError::custom)
            }
            other => Err(InputValueError::expected_type(other.clone())),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millis(millis) => Date::from_unix_millis(millis).map_err(de::Error::custom),
            Raw::Text(text) => Date::parse_rfc3339(&text).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_text_and_epoch_millis_from_backend() {
        let from_text: Date = serde_json::from_value(json!("2024-03-01T10:00:00Z")).unwrap();
        let from_millis: Date = serde_json::from_value(json!(1_709_287_200_000_i64)).unwrap();

        assert_eq!(from_text, from_millis);
        assert_eq!(from_text.to_string(), "2024-03-01T10:00:00Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_value::<Date>(json!("yesterday")).is_err());
        assert!(serde_json::from_value::<Date>(json!(true)).is_err());
    }

    #[test]
    fn graphql_round_trip_uses_rfc3339() {
        let parsed = <Date as ScalarType>::parse(Value::Number(1_709_287_200_000_i64.into())).unwrap();
        assert_eq!(
            parsed.to_value(),
            Value::String("2024-03-01T10:00:00Z".to_string())
        );

        assert!(<Date as ScalarType>::parse(Value::Boolean(true)).is_err());
    }
}
