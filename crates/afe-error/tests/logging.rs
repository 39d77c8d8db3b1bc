// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tracing output emitted by `afe-error`.

use std::sync::{Arc, Mutex};

use afe_error::{AfeError, ErrorCode, ErrorFactory};

/// Thread-safe buffer that captures tracing output.
#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl LogBuf {
    fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }
}

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuf {
    type Writer = LogBuf;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn setup_tracing() -> (LogBuf, tracing::subscriber::DefaultGuard) {
    let buf = LogBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buf, guard)
}

#[test]
fn log_emits_structured_fields() {
    let (buf, _guard) = setup_tracing();
    AfeError::new(
        ErrorCode::JSONSerializationFailed,
        "Unable to parse response",
    )
    .log();
    let out = buf.contents();
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("afe.error"), "{out}");
    assert!(out.contains("com.alamofire.error"), "{out}");
    assert!(out.contains("-6006"), "{out}");
    assert!(out.contains("JSON_SERIALIZATION_FAILED"), "{out}");
    assert!(out.contains("Unable to parse response"), "{out}");
}

#[test]
fn log_for_ad_hoc_code_has_no_kind() {
    let (buf, _guard) = setup_tracing();
    AfeError::with_raw_code("com.example.custom", 42, "custom failure").log();
    let out = buf.contents();
    assert!(out.contains("com.example.custom"), "{out}");
    assert!(out.contains("code=42"), "{out}");
    assert!(!out.contains("kind="), "{out}");
}

#[test]
fn construction_alone_is_silent() {
    let (buf, _guard) = setup_tracing();
    let _err = AfeError::new(ErrorCode::DataSerializationFailed, "empty");
    assert!(buf.contents().is_empty());
}

#[test]
fn factory_creation_logs_domain_at_debug() {
    let (buf, _guard) = setup_tracing();
    let _factory = ErrorFactory::new("com.example.net");
    let out = buf.contents();
    assert!(out.contains("DEBUG"), "{out}");
    assert!(out.contains("afe.factory"), "{out}");
    assert!(out.contains("com.example.net"), "{out}");
}
