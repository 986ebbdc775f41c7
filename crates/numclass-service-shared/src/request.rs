//! Query parameters accepted by the classification endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/classify-number`.
///
/// `number` stays raw text; parsing and validation happen in `numclass-lib`
/// so the original value can be echoed back on rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyQuery {
    #[serde(default)]
    pub number: Option<String>,
}

impl ClassifyQuery {
    /// Build the query from a raw query string.
    ///
    /// Repeated `number` parameters are joined with `,` so the request is
    /// rejected with the combined text echoed back. An unparsable query
    /// string is treated as having no `number` parameter.
    pub fn from_query_string(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = query
            .map(serde_urlencoded::from_str::<Vec<(String, String)>>)
            .transpose()
            .unwrap_or_default()
            .unwrap_or_default();

        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "number")
            .map(|(_, value)| value)
            .collect();

        Self {
            number: (!values.is_empty()).then(|| values.join(",")),
        }
    }

    /// The raw `number` value, if the parameter was present.
    pub fn raw(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Metric label describing why this query would be rejected.
    pub fn rejection_reason(&self) -> &'static str {
        match self.raw() {
            None => "missing",
            Some("") => "empty",
            Some(_) => "invalid",
        }
    }
}
