//! Number classification library entry points.
//!
//! This crate parses raw user input into a non-negative integer, computes the
//! numeric properties exposed by the HTTP service (primality, perfection,
//! Armstrong property, parity, digit sum) and attaches a trivia fact from a
//! [`FactProvider`]. Higher-level consumers (CLI, HTTP service) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod classify;
pub mod error;
pub mod facts;
pub mod numbers_api;
pub mod parse;
pub mod predicates;

pub use classify::{
    classify, classify_number, ClassificationError, ClassificationResult, Property,
};
pub use error::{Error, Result};
pub use facts::{FactProvider, FactUnavailable, OfflineFacts, FALLBACK_FUN_FACT};
pub use numbers_api::{
    NumbersApiClient, NumbersApiConfig, DEFAULT_FACT_TIMEOUT, DEFAULT_NUMBERS_API_BASE,
};
pub use parse::{parse_number, ParseOptions, ParsedNumber};
pub use predicates::{digit_sum, is_armstrong, is_even, is_perfect, is_prime};
