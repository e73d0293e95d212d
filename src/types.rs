//! API types for the RegexSolver SDK.

use crate::error::Error;
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of strings matched by a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "CardinalityRepr")]
pub enum Cardinality {
    /// Infinitely many strings.
    Infinite,
    /// Finite, but too large to fit the service's integer type.
    BigInteger,
    /// Exact number of strings. Decoding fails if the API omits the count.
    Integer(u64),
    /// The service could not determine the count.
    Unknown,
}

impl Cardinality {
    /// True if the term matches infinitely many strings.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Cardinality::Infinite)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Infinite => f.write_str("Infinite"),
            Cardinality::BigInteger => f.write_str("BigInteger"),
            Cardinality::Integer(n) => write!(f, "Integer({})", n),
            Cardinality::Unknown => f.write_str("Unknown"),
        }
    }
}

#[derive(Deserialize)]
enum CardinalityType {
    Infinite,
    BigInteger,
    Integer,
    Unknown,
}

/// Wire shape: `{"type": "...", "value": <int>|null}`.
#[derive(Deserialize)]
struct CardinalityRepr {
    #[serde(rename = "type")]
    kind: CardinalityType,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl TryFrom<CardinalityRepr> for Cardinality {
    type Error = Error;

    fn try_from(repr: CardinalityRepr) -> Result<Self, Self::Error> {
        Ok(match repr.kind {
            CardinalityType::Infinite => Cardinality::Infinite,
            CardinalityType::BigInteger => Cardinality::BigInteger,
            CardinalityType::Unknown => Cardinality::Unknown,
            CardinalityType::Integer => match repr.value.as_ref().and_then(|v| v.as_u64()) {
                Some(n) => Cardinality::Integer(n),
                None => {
                    return Err(Error::Validation(
                        "Integer cardinality requires a value".into(),
                    ))
                }
            },
        })
    }
}

/// Minimum and maximum length of the matched strings.
///
/// Sent by the API as a positional pair `[minimum, maximum]`. A `None`
/// maximum means unbounded; both are `None` for a term matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<Option<u64>>")]
pub struct Length {
    /// Length of the shortest matched string.
    pub minimum: Option<u64>,
    /// Length of the longest matched string.
    pub maximum: Option<u64>,
}

impl TryFrom<Vec<Option<u64>>> for Length {
    type Error = Error;

    fn try_from(values: Vec<Option<u64>>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [minimum, maximum] => Ok(Length {
                minimum: *minimum,
                maximum: *maximum,
            }),
            _ => Err(Error::Validation(format!(
                "List must contain exactly two elements, got {}",
                values.len()
            ))),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Length[minimum={}, maximum={}]",
            OptionalInt(self.minimum),
            OptionalInt(self.maximum)
        )
    }
}

/// Details about a term, as computed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Details {
    /// Number of matched strings.
    pub cardinality: Cardinality,
    /// Length bounds of the matched strings.
    pub length: Length,
    /// True if the term matches no string.
    pub empty: bool,
    /// True if the term matches every string.
    pub total: bool,
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Details[cardinality={}, length={}, empty={}, total={}]",
            self.cardinality,
            self.length,
            flag(self.empty),
            flag(self.total)
        )
    }
}

struct OptionalInt(Option<u64>);

impl fmt::Display for OptionalInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{}", n),
            None => f.write_str("None"),
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Request carrying an ordered list of terms.
#[derive(Debug, Clone, Serialize)]
pub struct MultiTermsRequest {
    /// Terms, in operand order.
    pub terms: Vec<Term>,
}

impl MultiTermsRequest {
    /// Create a request from the given terms.
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

/// Request for generating strings matched by a term.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateStringsRequest {
    /// Term to generate strings from.
    pub term: Term,
    /// Maximum number of unique strings to generate.
    pub count: u32,
}

/// Boolean answer from an analysis endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BooleanResult {
    /// The answer.
    pub value: bool,
}

/// Strings returned by the generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StringsResult {
    /// Generated strings.
    pub value: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_from_pair() {
        let length: Length = serde_json::from_value(json!([2, 3])).unwrap();
        assert_eq!(length.minimum, Some(2));
        assert_eq!(length.maximum, Some(3));

        let length: Length = serde_json::from_value(json!([0, null])).unwrap();
        assert_eq!(length.to_string(), "Length[minimum=0, maximum=None]");
    }

    #[test]
    fn test_length_rejects_wrong_arity() {
        assert!(matches!(
            Length::try_from(vec![Some(1u64)]),
            Err(Error::Validation(_))
        ));
        assert!(Length::try_from(vec![Some(1u64), Some(2), Some(3)]).is_err());
        assert!(Length::try_from(Vec::<Option<u64>>::new()).is_err());

        assert!(serde_json::from_value::<Length>(json!([1, 2, 3])).is_err());
        assert!(serde_json::from_value::<Length>(json!({"minimum": 1, "maximum": 2})).is_err());
    }

    #[test]
    fn test_cardinality_decoding() {
        let c: Cardinality =
            serde_json::from_value(json!({"type": "Integer", "value": 2})).unwrap();
        assert_eq!(c, Cardinality::Integer(2));
        assert_eq!(c.to_string(), "Integer(2)");

        let c: Cardinality =
            serde_json::from_value(json!({"type": "Infinite", "value": null})).unwrap();
        assert!(c.is_infinite());
        assert_eq!(c.to_string(), "Infinite");

        let c: Cardinality = serde_json::from_value(json!({"type": "BigInteger"})).unwrap();
        assert_eq!(c.to_string(), "BigInteger");

        let c: Cardinality =
            serde_json::from_value(json!({"type": "BigInteger", "value": 1e30})).unwrap();
        assert_eq!(c.to_string(), "BigInteger");
        assert!(!c.is_infinite());

        let c: Cardinality = serde_json::from_value(json!({"type": "Unknown"})).unwrap();
        assert_eq!(c, Cardinality::Unknown);
    }

    #[test]
    fn test_cardinality_integer_requires_value() {
        assert!(serde_json::from_value::<Cardinality>(json!({"type": "Integer"})).is_err());
        assert!(
            serde_json::from_value::<Cardinality>(json!({"type": "Integer", "value": null}))
                .is_err()
        );
        assert!(serde_json::from_value::<Cardinality>(json!({"type": "Huge"})).is_err());
    }

    #[test]
    fn test_details_rendering() {
        let details: Details = serde_json::from_value(json!({
            "type": "details",
            "cardinality": {"type": "Integer", "value": 2},
            "length": [2, 3],
            "empty": false,
            "total": false
        }))
        .unwrap();

        assert_eq!(
            details.to_string(),
            "Details[cardinality=Integer(2), length=Length[minimum=2, maximum=3], empty=False, total=False]"
        );
    }

    #[test]
    fn test_details_rendering_empty_language() {
        let details: Details = serde_json::from_value(json!({
            "type": "details",
            "cardinality": {"type": "Integer", "value": 0},
            "length": [null, null],
            "empty": true,
            "total": false
        }))
        .unwrap();

        assert_eq!(
            details.to_string(),
            "Details[cardinality=Integer(0), length=Length[minimum=None, maximum=None], empty=True, total=False]"
        );
    }

    #[test]
    fn test_multi_terms_request_shape() {
        let request = MultiTermsRequest::new(vec![
            Term::regex("abc"),
            Term::regex("def"),
            Term::regex("ghi"),
        ]);

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"terms":[{"type":"regex","value":"abc"},{"type":"regex","value":"def"},{"type":"regex","value":"ghi"}]}"#
        );
    }

    #[test]
    fn test_generate_strings_request_shape() {
        let request = GenerateStringsRequest {
            term: Term::regex("(abc|de){2,3}"),
            count: 10,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "term": {"type": "regex", "value": "(abc|de){2,3}"},
                "count": 10
            })
        );
    }
}
