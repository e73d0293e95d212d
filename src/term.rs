//! Terms: regular expressions and FAIRs the API operates on.

use crate::client::Client;
use crate::error::Result;
use crate::types::{Details, GenerateStringsRequest, MultiTermsRequest};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use tracing::debug;

const REGEX_PREFIX: &str = "regex";
const FAIR_PREFIX: &str = "fair";

/// Kind of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    /// A regular expression pattern.
    Regex,
    /// A Fast Automaton Internal Representation, produced by the API.
    Fair,
}

impl TermType {
    /// The tag used on the wire and in serialized text.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermType::Regex => REGEX_PREFIX,
            TermType::Fair => FAIR_PREFIX,
        }
    }
}

/// A term on which set operations can be performed.
///
/// A term is either a regular expression or a FAIR (Fast Automaton Internal
/// Representation). Equality and hashing only consider the type and value.
///
/// The details fetched by [`Term::get_details`] are kept for the lifetime of
/// the term. Concurrent first calls may each reach the API; the first stored
/// value is kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "TermRepr")]
pub struct Term {
    term_type: TermType,
    value: String,
    details: OnceLock<Details>,
}

#[derive(Deserialize)]
struct TermRepr {
    #[serde(rename = "type")]
    term_type: TermType,
    value: String,
}

impl From<TermRepr> for Term {
    fn from(repr: TermRepr) -> Self {
        Term::new(repr.term_type, repr.value)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Term", 2)?;
        state.serialize_field("type", &self.term_type)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

impl Term {
    fn new(term_type: TermType, value: String) -> Self {
        Self {
            term_type,
            value,
            details: OnceLock::new(),
        }
    }

    /// Create a term from a regular expression pattern.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(TermType::Regex, pattern.into())
    }

    /// Create a term from a FAIR.
    pub fn fair(fair: impl Into<String>) -> Self {
        Self::new(TermType::Fair, fair.into())
    }

    /// The kind of this term.
    pub fn term_type(&self) -> TermType {
        self.term_type
    }

    /// The raw payload, whatever the kind.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The regular expression pattern, if this term is a regex.
    pub fn pattern(&self) -> Option<&str> {
        match self.term_type {
            TermType::Regex => Some(&self.value),
            TermType::Fair => None,
        }
    }

    /// The FAIR, if this term is one.
    pub fn fair_encoding(&self) -> Option<&str> {
        match self.term_type {
            TermType::Fair => Some(&self.value),
            TermType::Regex => None,
        }
    }

    /// Serialize into `<type>=<value>`, readable by [`Term::deserialize_str`].
    ///
    /// The value is written verbatim, `=` included.
    pub fn serialize_str(&self) -> String {
        self.to_string()
    }

    /// Parse text produced by [`Term::serialize_str`].
    ///
    /// Returns `None` for empty or unrecognized input. The kind is read from
    /// the fixed prefix, `regex` being checked before `fair`, and the single
    /// separator character after it is skipped.
    pub fn deserialize_str(text: &str) -> Option<Term> {
        if text.is_empty() {
            return None;
        }

        if let Some(rest) = text.strip_prefix(REGEX_PREFIX) {
            Some(Term::regex(skip_separator(rest)))
        } else if let Some(rest) = text.strip_prefix(FAIR_PREFIX) {
            Some(Term::fair(skip_separator(rest)))
        } else {
            None
        }
    }

    /// Details previously fetched for this term, if any.
    pub fn cached_details(&self) -> Option<&Details> {
        self.details.get()
    }

    /// Get the details of this term.
    ///
    /// The API is only called the first time; later calls return the stored
    /// value.
    pub async fn get_details(&self, client: &Client) -> Result<&Details> {
        if let Some(details) = self.details.get() {
            debug!(term = %self, "Using cached details");
            return Ok(details);
        }

        let details = client.get_details(self).await?;
        Ok(self.details.get_or_init(|| details))
    }

    /// Generate up to `count` unique strings matched by this term.
    pub async fn generate_strings(&self, client: &Client, count: u32) -> Result<Vec<String>> {
        let request = GenerateStringsRequest {
            term: self.clone(),
            count,
        };
        client.generate_strings(&request).await
    }

    /// Compute the intersection of this term with `terms`.
    pub async fn intersection(&self, client: &Client, terms: &[Term]) -> Result<Term> {
        client.compute_intersection(&self.with_operands(terms)).await
    }

    /// Compute the union of this term with `terms`.
    pub async fn union(&self, client: &Client, terms: &[Term]) -> Result<Term> {
        client.compute_union(&self.with_operands(terms)).await
    }

    /// Compute this term minus `term`.
    pub async fn subtraction(&self, client: &Client, term: &Term) -> Result<Term> {
        client
            .compute_subtraction(&self.with_operands(std::slice::from_ref(term)))
            .await
    }

    /// Check whether this term matches exactly the same strings as `term`.
    pub async fn is_equivalent_to(&self, client: &Client, term: &Term) -> Result<bool> {
        client
            .equivalence(&self.with_operands(std::slice::from_ref(term)))
            .await
    }

    /// Check whether every string matched by this term is matched by `term`.
    pub async fn is_subset_of(&self, client: &Client, term: &Term) -> Result<bool> {
        client
            .subset(&self.with_operands(std::slice::from_ref(term)))
            .await
    }

    fn with_operands(&self, others: &[Term]) -> MultiTermsRequest {
        let mut terms = Vec::with_capacity(others.len() + 1);
        terms.push(self.clone());
        terms.extend_from_slice(others);
        MultiTermsRequest::new(terms)
    }
}

fn skip_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.term_type == other.term_type && self.value == other.value
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term_type.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.term_type.as_str(), self.value)
    }
}
