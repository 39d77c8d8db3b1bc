// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog of Alamofire-compatible error codes.
//!
//! Every [`AfeError`] carries a domain string (normally [`DEFAULT_DOMAIN`]),
//! an integer code (normally one of the [`ErrorCode`] values), and a
//! `user_info` map that always holds the failure reason under
//! [`user_info_keys::FAILURE_REASON`].
//!
//! ```
//! use afe_error::{AfeError, ErrorCode, DEFAULT_DOMAIN};
//!
//! let err = AfeError::new(ErrorCode::JSONSerializationFailed, "Unable to parse response");
//! assert_eq!(err.domain, DEFAULT_DOMAIN);
//! assert_eq!(err.code, -6006);
//! assert_eq!(err.failure_reason(), Some("Unable to parse response"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod factory;

pub use factory::ErrorFactory;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Domain attached to every error this crate creates unless overridden.
pub const DEFAULT_DOMAIN: &str = "com.alamofire.error";

/// Well-known keys used in [`AfeError::user_info`].
pub mod user_info_keys {
    /// Human-readable failure reason. Always present on constructed errors.
    ///
    /// Matches the literal behind Foundation's `NSLocalizedFailureReasonErrorKey`.
    pub const FAILURE_REASON: &str = "NSLocalizedFailureReason";

    /// Content type for a `ContentTypeValidationFailed` error, stored as a string.
    pub const CONTENT_TYPE: &str = "ContentType";

    /// Status code for a `StatusCodeValidationFailed` error, stored as an integer.
    pub const STATUS_CODE: &str = "StatusCode";
}

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// Broad family that an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Reading or writing a body stream.
    Stream,
    /// Response validation (content type, status code).
    Validation,
    /// Response serialization.
    Serialization,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stream => "stream",
            Self::Validation => "validation",
            Self::Serialization => "serialization",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Error codes published by the catalog.
///
/// The integer values are part of the public contract: callers persist and
/// compare them, so a value is never reassigned.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorCode {
    /// Reading from an input stream failed.
    InputStreamReadFailed = -6000,
    /// Writing to an output stream failed.
    OutputStreamWriteFailed = -6001,
    /// The response content type was not acceptable.
    ContentTypeValidationFailed = -6002,
    /// The response status code was not acceptable.
    StatusCodeValidationFailed = -6003,
    /// Response data could not be produced.
    DataSerializationFailed = -6004,
    /// Response data could not be decoded as a string.
    StringSerializationFailed = -6005,
    /// Response data could not be decoded as JSON.
    #[serde(rename = "JSON_SERIALIZATION_FAILED")]
    JSONSerializationFailed = -6006,
    /// Response data could not be decoded as a property list.
    PropertyListSerializationFailed = -6007,
}

impl ErrorCode {
    /// Every catalog entry, in code order.
    pub const ALL: [ErrorCode; 8] = [
        Self::InputStreamReadFailed,
        Self::OutputStreamWriteFailed,
        Self::ContentTypeValidationFailed,
        Self::StatusCodeValidationFailed,
        Self::DataSerializationFailed,
        Self::StringSerializationFailed,
        Self::JSONSerializationFailed,
        Self::PropertyListSerializationFailed,
    ];

    /// Published integer value.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Reverse lookup of a raw code. Returns `None` for codes outside the catalog.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.code()) == code)
    }

    /// Returns the broad [`ErrorCategory`] this code belongs to.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::InputStreamReadFailed | Self::OutputStreamWriteFailed => ErrorCategory::Stream,

            Self::ContentTypeValidationFailed | Self::StatusCodeValidationFailed => {
                ErrorCategory::Validation
            }

            Self::DataSerializationFailed
            | Self::StringSerializationFailed
            | Self::JSONSerializationFailed
            | Self::PropertyListSerializationFailed => ErrorCategory::Serialization,
        }
    }

    /// Stable `&'static str` tag (e.g. `"JSON_SERIALIZATION_FAILED"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputStreamReadFailed => "INPUT_STREAM_READ_FAILED",
            Self::OutputStreamWriteFailed => "OUTPUT_STREAM_WRITE_FAILED",
            Self::ContentTypeValidationFailed => "CONTENT_TYPE_VALIDATION_FAILED",
            Self::StatusCodeValidationFailed => "STATUS_CODE_VALIDATION_FAILED",
            Self::DataSerializationFailed => "DATA_SERIALIZATION_FAILED",
            Self::StringSerializationFailed => "STRING_SERIALIZATION_FAILED",
            Self::JSONSerializationFailed => "JSON_SERIALIZATION_FAILED",
            Self::PropertyListSerializationFailed => "PROPERTY_LIST_SERIALIZATION_FAILED",
        }
    }

    /// Short human-readable description of the failure class.
    pub fn description(self) -> &'static str {
        match self {
            Self::InputStreamReadFailed => "Failed to read from the input stream",
            Self::OutputStreamWriteFailed => "Failed to write to the output stream",
            Self::ContentTypeValidationFailed => "Response content type was not acceptable",
            Self::StatusCodeValidationFailed => "Response status code was not acceptable",
            Self::DataSerializationFailed => "Response data could not be serialized",
            Self::StringSerializationFailed => "Response data could not be decoded as a string",
            Self::JSONSerializationFailed => "Response data could not be decoded as JSON",
            Self::PropertyListSerializationFailed => {
                "Response data could not be decoded as a property list"
            }
        }
    }

    /// The `user_info` key this kind conventionally carries besides the
    /// failure reason, if any.
    pub fn expected_user_info_key(self) -> Option<&'static str> {
        match self {
            Self::ContentTypeValidationFailed => Some(user_info_keys::CONTENT_TYPE),
            Self::StatusCodeValidationFailed => Some(user_info_keys::STATUS_CODE),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Raw code that does not belong to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("code {0} is not part of the error catalog")]
pub struct UnknownCode(pub i64);

impl TryFrom<i64> for ErrorCode {
    type Error = UnknownCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownCode(code))
    }
}

// ---------------------------------------------------------------------------
// AfeError
// ---------------------------------------------------------------------------

/// Error value produced by the catalog.
///
/// Carries a domain, an integer code (not restricted to [`ErrorCode`]), a
/// `user_info` map with at least the failure reason, and an optional source
/// error for cause-chaining.
///
/// # Builder usage
///
/// ```
/// use afe_error::{AfeError, ErrorCode, user_info_keys};
///
/// let err = AfeError::new(ErrorCode::StatusCodeValidationFailed, "status 503 not in 200..<300")
///     .with_status_code(503);
/// assert_eq!(err.status_code(), Some(503));
/// assert!(err.user_info.contains_key(user_info_keys::STATUS_CODE));
/// ```
pub struct AfeError {
    /// Subsystem that originated the error.
    pub domain: String,
    /// Integer error code.
    pub code: i64,
    /// Auxiliary key-value data. Always holds the failure reason.
    pub user_info: BTreeMap<String, serde_json::Value>,
    /// Optional underlying cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Catalog entry the error was created from; survives domain changes.
    catalog: Option<ErrorCode>,
}

impl AfeError {
    /// Create an error for a catalog code in the [`DEFAULT_DOMAIN`].
    pub fn new(code: ErrorCode, failure_reason: impl Into<String>) -> Self {
        Self::with_code_in_domain(DEFAULT_DOMAIN, code, failure_reason)
    }

    /// Create an error for a catalog code in an explicit domain.
    ///
    /// The value keeps its [`kind`](Self::kind) even though the domain is
    /// not [`DEFAULT_DOMAIN`].
    pub fn with_code_in_domain(
        domain: impl Into<String>,
        code: ErrorCode,
        failure_reason: impl Into<String>,
    ) -> Self {
        let mut err = Self::with_raw_code(domain, i64::from(code.code()), failure_reason);
        err.catalog = Some(code);
        err
    }

    /// Create an error for an arbitrary code in the [`DEFAULT_DOMAIN`].
    pub fn from_raw_code(code: i64, failure_reason: impl Into<String>) -> Self {
        Self::with_raw_code(DEFAULT_DOMAIN, code, failure_reason)
    }

    /// Create an error for an arbitrary code in an explicit domain.
    pub fn with_raw_code(
        domain: impl Into<String>,
        code: i64,
        failure_reason: impl Into<String>,
    ) -> Self {
        let mut user_info = BTreeMap::new();
        user_info.insert(
            user_info_keys::FAILURE_REASON.to_string(),
            serde_json::Value::String(failure_reason.into()),
        );
        Self {
            domain: domain.into(),
            code,
            user_info,
            source: None,
            catalog: None,
        }
    }

    /// Replace the domain. A catalog kind recorded at construction is kept.
    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Attach a key-value pair to `user_info`.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    pub fn with_user_info(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.user_info.insert(key.into(), v);
        }
        self
    }

    /// Attach the rejected content type under [`user_info_keys::CONTENT_TYPE`].
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_user_info(user_info_keys::CONTENT_TYPE, content_type.into())
    }

    /// Attach the rejected status code under [`user_info_keys::STATUS_CODE`].
    pub fn with_status_code(self, status: u16) -> Self {
        self.with_user_info(user_info_keys::STATUS_CODE, status)
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The failure reason, if it is still a string.
    pub fn failure_reason(&self) -> Option<&str> {
        self.user_info
            .get(user_info_keys::FAILURE_REASON)
            .and_then(serde_json::Value::as_str)
    }

    /// Content type recorded for a validation failure.
    pub fn content_type(&self) -> Option<&str> {
        self.user_info
            .get(user_info_keys::CONTENT_TYPE)
            .and_then(serde_json::Value::as_str)
    }

    /// Status code recorded for a validation failure.
    pub fn status_code(&self) -> Option<u16> {
        self.user_info
            .get(user_info_keys::STATUS_CODE)
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u16::try_from(v).ok())
    }

    /// Catalog entry for this error.
    ///
    /// Errors built from an [`ErrorCode`] resolve in any domain as long as
    /// `code` still matches. Raw codes only resolve in [`DEFAULT_DOMAIN`].
    pub fn kind(&self) -> Option<ErrorCode> {
        match self.catalog {
            Some(kind) if i64::from(kind.code()) == self.code => Some(kind),
            _ if self.domain == DEFAULT_DOMAIN => ErrorCode::from_code(self.code),
            _ => None,
        }
    }

    /// `true` when [`kind`](Self::kind) resolves.
    pub fn is_catalog_error(&self) -> bool {
        self.kind().is_some()
    }

    /// Shorthand for `self.kind().map(ErrorCode::category)`.
    pub fn category(&self) -> Option<ErrorCategory> {
        self.kind().map(ErrorCode::category)
    }

    /// Advisory check: the key a validation kind conventionally carries but
    /// this value lacks.
    ///
    /// Construction never requires these entries; this only reports them.
    pub fn missing_user_info(&self) -> Option<&'static str> {
        let key = self.kind()?.expected_user_info_key()?;
        if self.user_info.contains_key(key) {
            None
        } else {
            Some(key)
        }
    }

    /// Emit this error as a structured `tracing` event.
    pub fn log(&self) {
        warn!(
            target: "afe.error",
            domain = %self.domain,
            code = self.code,
            kind = self.kind().map(ErrorCode::as_str),
            reason = self.failure_reason().unwrap_or_default(),
            "afe error"
        );
    }
}

impl fmt::Debug for AfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("AfeError");
        d.field("domain", &self.domain);
        d.field("code", &self.code);
        d.field("user_info", &self.user_info);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        d.finish()
    }
}

impl fmt::Display for AfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.domain, self.code)?;
        if let Some(reason) = self.failure_reason() {
            write!(f, ": {reason}")?;
        }
        let extra: BTreeMap<&String, &serde_json::Value> = self
            .user_info
            .iter()
            .filter(|(k, _)| k.as_str() != user_info_keys::FAILURE_REASON)
            .collect();
        if !extra.is_empty()
            && let Ok(json) = serde_json::to_string(&extra)
        {
            write!(f, " {json}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// Serialization support
// ---------------------------------------------------------------------------

/// Serialisable snapshot of an [`AfeError`] (without the opaque source).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct AfeErrorDto {
    /// Error domain.
    pub domain: String,
    /// Integer error code.
    pub code: i64,
    /// Catalog entry, if the error has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorCode>,
    /// User-info entries.
    pub user_info: BTreeMap<String, serde_json::Value>,
    /// String representation of the source error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_message: Option<String>,
}

impl From<&AfeError> for AfeErrorDto {
    fn from(err: &AfeError) -> Self {
        Self {
            domain: err.domain.clone(),
            code: err.code,
            kind: err.kind(),
            user_info: err.user_info.clone(),
            source_message: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}

impl From<AfeErrorDto> for AfeError {
    fn from(dto: AfeErrorDto) -> Self {
        Self {
            domain: dto.domain,
            code: dto.code,
            user_info: dto.user_info,
            source: None,
            catalog: dto.kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
