use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ParseError, ParseResult};
use crate::models::Category;

/// Keys whose presence marks a payload as an API error report.
const ERROR_KEYS: [&str; 2] = ["errorMessage", "error"];

///
/// Turns one source's raw payload into categories.
///
/// Parsers are pure: the same payload always yields the same categories.
/// `Ok(None)` means the payload held nothing worth drawing, including the
/// case where the API answered with an error report instead of data.
///
pub trait Parser: Send + Sync {
    /// Short source name used in logs and errors.
    fn name(&self) -> &'static str;

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>>;
}

/// Whether `raw` is an error report rather than data.
pub fn is_error_payload(raw: &Value) -> bool {
    match raw {
        Value::Object(map) => ERROR_KEYS.iter().any(|k| map.contains_key(*k)),
        Value::Null => true,
        _ => false,
    }
}

///
/// Deserialize a payload into a parser's raw model.
///
/// # Returns
/// - `Ok(None)` for error reports
pub(crate) fn decode<T: DeserializeOwned>(
    source_name: &'static str,
    id: &str,
    raw: &Value,
) -> ParseResult<Option<T>> {
    if is_error_payload(raw) {
        log::warn!("{} returned an error payload for {}", source_name, id);
        return Ok(None);
    }
    T::deserialize(raw)
        .map(Some)
        .map_err(|error| ParseError::Payload { source_name, error })
}

/// `DOMAINS_AND_SITES` becomes `Domains & sites`.
pub fn humanize(raw: &str) -> String {
    let words: Vec<String> = raw
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            if w.eq_ignore_ascii_case("and") {
                "&".to_string()
            } else {
                w.to_ascii_lowercase()
            }
        })
        .collect();
    let joined = words.join(" ");

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    #[case(json!({"errorMessage": ["not found"], "requestedURL": "x"}), true)]
    #[case(json!({"error": "timeout"}), true)]
    #[case(json!(null), true)]
    #[case(json!({"features": []}), false)]
    #[case(json!([]), false)]
    fn test_error_payload_detection(#[case] raw: Value, #[case] expected: bool) {
        assert_eq!(is_error_payload(&raw), expected);
    }

    #[rstest]
    #[case("DOMAINS_AND_SITES", "Domains & sites")]
    #[case("PTM", "Ptm")]
    #[case("ACT_SITE", "Act site")]
    #[case("", "")]
    fn test_humanize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(humanize(raw), expected);
    }

    #[rstest]
    fn test_decode_reports_shape_errors() {
        let err = decode::<Vec<u32>>("features", "P1", &json!({"features": 1})).unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(err, ParseError::Payload { source_name: "features", .. }));

        let none = decode::<Vec<u32>>("features", "P1", &json!({"error": "x"})).unwrap();
        assert_eq!(none, None);
    }
}
