//! Trivia fact providers.
//!
//! The classifier only needs one operation from the outside world: given a
//! number, return a text fact or report that none is available. Failures are
//! expressed as [`FactUnavailable`] values rather than errors so callers can
//! substitute [`FALLBACK_FUN_FACT`] without special handling.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Text used whenever a fact cannot be obtained.
pub const FALLBACK_FUN_FACT: &str = "No fun fact available";

/// Reasons a fact provider could not return a fact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FactUnavailable {
    /// The provider did not answer within its timeout.
    #[error("fact request timed out")]
    Timeout,

    /// The request could not be sent or the response could not be read.
    #[error("fact request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success HTTP status.
    #[error("fact provider returned HTTP {0}")]
    Status(u16),

    /// The provider answered with an empty body.
    #[error("fact provider returned an empty body")]
    EmptyBody,

    /// Fact lookups are disabled.
    #[error("fact lookups are disabled")]
    Offline,
}

impl FactUnavailable {
    /// Short, low-cardinality label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            FactUnavailable::Timeout => "timeout",
            FactUnavailable::Transport(_) => "transport",
            FactUnavailable::Status(_) => "status",
            FactUnavailable::EmptyBody => "empty_body",
            FactUnavailable::Offline => "offline",
        }
    }
}

/// Source of trivia facts about numbers.
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Fetch a fact about `number`.
    async fn fetch_fact(&self, number: u64) -> Result<String, FactUnavailable>;

    /// Provider name used in logs and readiness output.
    fn name(&self) -> &str;
}

#[async_trait]
impl<P: FactProvider + ?Sized> FactProvider for Arc<P> {
    async fn fetch_fact(&self, number: u64) -> Result<String, FactUnavailable> {
        (**self).fetch_fact(number).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Provider that never returns a fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFacts;

#[async_trait]
impl FactProvider for OfflineFacts {
    async fn fetch_fact(&self, _number: u64) -> Result<String, FactUnavailable> {
        Err(FactUnavailable::Offline)
    }

    fn name(&self) -> &str {
        "offline"
    }
}
