// SPDX-License-Identifier: MIT OR Apache-2.0
//! Domain-bound constructor for [`AfeError`] values.

use crate::{AfeError, DEFAULT_DOMAIN, ErrorCode};
use tracing::debug;

/// Creates errors in a fixed domain.
///
/// Useful when a host application rebrands the catalog under its own domain
/// (typically read from configuration) but still wants the published codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFactory {
    domain: String,
}

impl Default for ErrorFactory {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl ErrorFactory {
    /// Factory for the given domain.
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        debug!(target: "afe.factory", %domain, "error factory created");
        Self { domain }
    }

    /// Factory for an optional domain, falling back to [`DEFAULT_DOMAIN`].
    pub fn with_optional_domain(domain: Option<&str>) -> Self {
        match domain {
            Some(d) => Self::new(d),
            None => Self::default(),
        }
    }

    /// Domain used for every error this factory creates.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Error for a catalog code. The value keeps its [`AfeError::kind`] in
    /// this factory's domain.
    pub fn error(&self, code: ErrorCode, failure_reason: impl Into<String>) -> AfeError {
        AfeError::with_code_in_domain(self.domain.clone(), code, failure_reason)
    }

    /// Error for an arbitrary code. Outside [`DEFAULT_DOMAIN`] the value has
    /// no catalog kind, even when the integer matches a published code.
    pub fn raw(&self, code: i64, failure_reason: impl Into<String>) -> AfeError {
        AfeError::with_raw_code(self.domain.clone(), code, failure_reason)
    }
}
