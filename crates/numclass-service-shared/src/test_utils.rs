//! Test utilities for handler testing.
//!
//! Provides a canned [`FactProvider`] and helpers that build [`AppState`]
//! without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use numclass_lib::{FactProvider, FactUnavailable, ParseOptions};

use crate::facts::MeteredFacts;
use crate::state::AppState;

/// Fact provider returning the same answer for every number.
///
/// Counts calls so tests can assert the provider is queried exactly once,
/// or not at all for rejected input.
#[derive(Debug)]
pub struct StaticFacts {
    answer: Result<String, FactUnavailable>,
    calls: AtomicUsize,
}

impl StaticFacts {
    /// Provider that always returns `fact`.
    pub fn fact(fact: impl Into<String>) -> Self {
        Self {
            answer: Ok(fact.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that always fails with `reason`.
    pub fn failing(reason: FactUnavailable) -> Self {
        Self {
            answer: Err(reason),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FactProvider for StaticFacts {
    async fn fetch_fact(&self, _number: u64) -> Result<String, FactUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Build an [`AppState`] around `facts` with the given parsing options.
pub fn test_state(facts: Arc<StaticFacts>, parse_options: ParseOptions) -> AppState {
    AppState::from_components(Arc::new(MeteredFacts::new(facts)), parse_options)
}

/// Build an [`AppState`] whose provider always returns `fact`.
pub fn state_with_fact(fact: &str) -> AppState {
    test_state(Arc::new(StaticFacts::fact(fact)), ParseOptions::default())
}
