// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations for the `afe` CLI.

use afe_config::AfeConfig;
use afe_error::{AfeError, AfeErrorDto, ErrorCode};
use anyhow::Result;
use serde::Serialize;
use tracing::debug;

/// One row of `afe codes --json`.
#[derive(Debug, Serialize)]
pub struct CodeEntry {
    /// Integer code.
    pub code: i32,
    /// Stable tag.
    pub name: &'static str,
    /// Category name.
    pub category: String,
    /// Human-readable description.
    pub description: &'static str,
    /// Conventional extra user-info key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info_key: Option<&'static str>,
}

impl From<ErrorCode> for CodeEntry {
    fn from(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            name: code.as_str(),
            category: code.category().to_string(),
            description: code.description(),
            user_info_key: code.expected_user_info_key(),
        }
    }
}

/// Render the catalog as text or JSON.
pub fn codes(json: bool) -> Result<String> {
    if json {
        let entries: Vec<CodeEntry> = ErrorCode::ALL.into_iter().map(CodeEntry::from).collect();
        return Ok(serde_json::to_string_pretty(&entries)?);
    }
    let lines: Vec<String> = ErrorCode::ALL
        .into_iter()
        .map(|c| format!("{:>6}  {:<36} {}", c.code(), c.as_str(), c.description()))
        .collect();
    Ok(lines.join("\n"))
}

/// Describe a raw code.
pub fn explain(code: i64) -> String {
    match ErrorCode::from_code(code) {
        Some(kind) => {
            let mut out = format!(
                "{code} {}\ncategory: {}\n{}",
                kind.as_str(),
                kind.category(),
                kind.description()
            );
            if let Some(key) = kind.expected_user_info_key() {
                out.push_str(&format!("\nuser info key: {key}"));
            }
            out
        }
        None => format!("{code} is not part of the error catalog"),
    }
}

/// Arguments for [`make`].
#[derive(Debug, Default)]
pub struct MakeArgs {
    /// Raw code.
    pub code: i64,
    /// Failure reason.
    pub reason: String,
    /// Domain override; wins over the configured domain.
    pub domain: Option<String>,
    /// Content type to attach.
    pub content_type: Option<String>,
    /// Status code to attach.
    pub status_code: Option<u16>,
}

/// Build an error and render it as pretty JSON.
pub fn make(config: &AfeConfig, args: MakeArgs) -> Result<String> {
    let factory = config.error_factory();
    let mut err = match ErrorCode::from_code(args.code) {
        Some(kind) => factory.error(kind, args.reason),
        None => factory.raw(args.code, args.reason),
    };
    if let Some(domain) = args.domain {
        err = err.in_domain(domain);
    }
    if let Some(ct) = args.content_type {
        err = err.with_content_type(ct);
    }
    if let Some(status) = args.status_code {
        err = err.with_status_code(status);
    }
    if let Some(key) = err.missing_user_info() {
        debug!(target: "afe.cli", key, "validation error without conventional user info");
    }
    err.log();
    render(&err)
}

fn render(err: &AfeError) -> Result<String> {
    Ok(serde_json::to_string_pretty(&AfeErrorDto::from(err))?)
}

/// JSON schema of [`AfeErrorDto`].
pub fn schema() -> Result<String> {
    let schema = schemars::schema_for!(AfeErrorDto);
    Ok(serde_json::to_string_pretty(&schema)?)
}
