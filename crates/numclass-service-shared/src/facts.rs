//! Metered wrapper around a [`FactProvider`].

use std::time::Instant;

use async_trait::async_trait;
use numclass_lib::{FactProvider, FactUnavailable};

use crate::metrics::{record_fun_fact_latency, record_fun_fact_unavailable};

/// Records latency and fallback metrics for every lookup made through the
/// wrapped provider. Results pass through unchanged.
#[derive(Debug, Clone)]
pub struct MeteredFacts<P> {
    inner: P,
}

impl<P> MeteredFacts<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: FactProvider> FactProvider for MeteredFacts<P> {
    async fn fetch_fact(&self, number: u64) -> Result<String, FactUnavailable> {
        let start = Instant::now();
        let result = self.inner.fetch_fact(number).await;
        record_fun_fact_latency(start.elapsed().as_secs_f64(), self.inner.name());

        if let Err(reason) = &result {
            record_fun_fact_unavailable(reason.reason(), self.inner.name());
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
