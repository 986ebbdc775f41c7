//! Classification of a parsed number into its response contract.
//!
//! [`classify`] is the full pipeline used by the CLI and HTTP service:
//! parse the raw input, compute every numeric predicate, then ask the
//! [`FactProvider`] for a trivia fact. A missing fact never fails the
//! classification; [`FALLBACK_FUN_FACT`] is substituted instead.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::facts::{FactProvider, FALLBACK_FUN_FACT};
use crate::parse::{parse_number, ParseOptions, ParsedNumber};
use crate::predicates::{digit_sum, is_armstrong, is_even, is_perfect, is_prime};

/// Tags reported in the `properties` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Odd,
    Even,
}

impl Property {
    /// Tag as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Property::Armstrong => "armstrong",
            Property::Odd => "odd",
            Property::Even => "even",
        }
    }

    /// Parity tag for `n`.
    pub fn parity(n: u64) -> Self {
        if is_even(n) {
            Property::Even
        } else {
            Property::Odd
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful classification of a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub number: u64,
    pub is_prime: bool,
    pub is_perfect: bool,
    /// `armstrong` first when applicable, then exactly one of `odd`/`even`.
    pub properties: Vec<Property>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

impl ClassificationResult {
    /// Parity tag of the classified number.
    pub fn parity(&self) -> Property {
        Property::parity(self.number)
    }
}

/// Error body returned for rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationError {
    /// The original raw input, or an empty string when it was missing.
    pub number: String,
    pub error: bool,
}

impl ClassificationError {
    /// Error body for the given raw input.
    pub fn for_input(raw: impl Into<String>) -> Self {
        Self {
            number: raw.into(),
            error: true,
        }
    }
}

impl From<&Error> for ClassificationError {
    fn from(error: &Error) -> Self {
        Self::for_input(error.input().unwrap_or_default())
    }
}

/// Every field of a classification except the fun fact.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumericProfile {
    is_prime: bool,
    is_perfect: bool,
    properties: Vec<Property>,
    digit_sum: u64,
}

impl NumericProfile {
    fn compute(n: u64) -> Self {
        let mut properties = Vec::with_capacity(2);
        if is_armstrong(n) {
            properties.push(Property::Armstrong);
        }
        properties.push(Property::parity(n));

        Self {
            is_prime: is_prime(n),
            is_perfect: is_perfect(n),
            properties,
            digit_sum: digit_sum(n),
        }
    }

    fn into_result(self, number: u64, fun_fact: Option<String>) -> ClassificationResult {
        ClassificationResult {
            number,
            is_prime: self.is_prime,
            is_perfect: self.is_perfect,
            properties: self.properties,
            digit_sum: self.digit_sum,
            fun_fact: fun_fact.unwrap_or_else(|| FALLBACK_FUN_FACT.to_string()),
        }
    }
}

/// Classify an already parsed number with an optional fun fact.
///
/// `None` is replaced with [`FALLBACK_FUN_FACT`].
pub fn classify_number(number: ParsedNumber, fun_fact: Option<String>) -> ClassificationResult {
    NumericProfile::compute(number.value()).into_result(number.value(), fun_fact)
}

/// Parse `raw`, classify it, and attach a fact from `facts`.
///
/// Returns [`Error::InvalidInput`] for rejected input. The fact provider is
/// called exactly once, after all predicates are computed, and its failures
/// are logged and replaced with the fallback text.
pub async fn classify(
    raw: Option<&str>,
    options: &ParseOptions,
    facts: &dyn FactProvider,
) -> Result<ClassificationResult> {
    let number = parse_number(raw, options)?;
    let profile = NumericProfile::compute(number.value());

    let fun_fact = match facts.fetch_fact(number.value()).await {
        Ok(fact) => Some(fact),
        Err(reason) => {
            warn!(
                number = number.value(),
                provider = facts.name(),
                reason = %reason,
                "fun fact unavailable, using fallback"
            );
            None
        }
    };

    Ok(profile.into_result(number.value(), fun_fact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{FactUnavailable, OfflineFacts};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFacts {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FactProvider for CountingFacts {
        async fn fetch_fact(&self, number: u64) -> std::result::Result<String, FactUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} is a number", number))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_property_serialization() {
        let json = serde_json::to_string(&vec![Property::Armstrong, Property::Odd]).unwrap();
        assert_eq!(json, r#"["armstrong","odd"]"#);
    }

    #[test]
    fn test_classify_number_armstrong_first() {
        let result = classify_number(ParsedNumber::new(371), None);
        assert_eq!(result.properties, vec![Property::Armstrong, Property::Odd]);
        assert_eq!(result.digit_sum, 11);
        assert_eq!(result.fun_fact, FALLBACK_FUN_FACT);
    }

    #[test]
    fn test_classify_number_zero() {
        let result = classify_number(ParsedNumber::new(0), Some("zero".to_string()));
        assert!(!result.is_prime);
        assert!(!result.is_perfect);
        assert_eq!(result.properties, vec![Property::Armstrong, Property::Even]);
        assert_eq!(result.digit_sum, 0);
        assert_eq!(result.fun_fact, "zero");
    }

    #[test]
    fn test_classification_error_from_lib_error() {
        let body = ClassificationError::from(&Error::invalid_input(Some("abc")));
        assert_eq!(body, ClassificationError::for_input("abc"));
        assert!(body.error);
    }

    #[tokio::test]
    async fn test_classify_calls_provider_once() {
        let facts = CountingFacts {
            calls: AtomicUsize::new(0),
        };
        let result = classify(Some("28"), &ParseOptions::default(), &facts)
            .await
            .unwrap();

        assert_eq!(facts.calls.load(Ordering::SeqCst), 1);
        assert!(result.is_perfect);
        assert_eq!(result.fun_fact, "28 is a number");
    }

    #[tokio::test]
    async fn test_classify_invalid_input_skips_provider() {
        let facts = CountingFacts {
            calls: AtomicUsize::new(0),
        };
        let err = classify(Some("-5"), &ParseOptions::default(), &facts)
            .await
            .unwrap_err();

        assert_eq!(err.input(), Some("-5"));
        assert_eq!(facts.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classify_falls_back_when_offline() {
        let result = classify(Some("7"), &ParseOptions::default(), &OfflineFacts)
            .await
            .unwrap();
        assert!(result.is_prime);
        assert_eq!(result.fun_fact, FALLBACK_FUN_FACT);
    }
}
