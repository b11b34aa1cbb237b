//! Logging Infrastructure
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory configured, three daily rolling files are written:
//! - `app/`: everything except audit and security events
//! - `audit/`: user creation, role changes, menu creation
//! - `security/`: logins and rejected logins

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

pub const AUDIT_TARGET: &str = "audit";
pub const SECURITY_TARGET: &str = "security";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Default filter (e.g. "info", "debug,sqlx=warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines instead of the human-readable format
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// # use back_office::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + files)
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        let security_log_dir = log_dir.join("security");

        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;
        fs::create_dir_all(&security_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(
            file_layer(app_log, json_format)
                .with_filter(EnvFilter::new(level))
                .with_filter(filter_fn(|meta| {
                    meta.target() != AUDIT_TARGET && meta.target() != SECURITY_TARGET
                }))
                .boxed(),
        );

        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, "audit");
        layers.push(
            file_layer(audit_log, json_format)
                .with_filter(filter_fn(|meta| meta.target() == AUDIT_TARGET))
                .boxed(),
        );

        let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
        layers.push(
            file_layer(security_log, json_format)
                .with_filter(filter_fn(|meta| meta.target() == SECURITY_TARGET))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

fn file_layer(appender: RollingFileAppender, json_format: bool) -> BoxedLayer {
    let writer = std::sync::Mutex::new(appender);
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    }
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Audit log helper - records changes to users, roles, menus and stock
///
/// The console has no signed-in session, so records carry the action and
/// the changed resource only.
///
/// # Examples
/// ```no_run
/// # use back_office::audit_log;
/// audit_log!("create_user", "user:maria");
/// audit_log!("update_role", "user:12", "admin");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - records authentication events
///
/// # Examples
/// ```no_run
/// # use back_office::security_log;
/// security_log!(WARN, "login_failed", username = "admin", reason = "invalid_password");
/// security_log!(INFO, "login", user_id = 7);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_creates_rolling_files() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        init_logger_with_file("info", true, Some(dir_str)).unwrap();
        crate::audit_log!("create_user", "user:test");

        for (sub, prefix) in [("app", "app"), ("audit", "audit"), ("security", "security")] {
            let names: Vec<String> = fs::read_dir(dir.path().join(sub))
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            assert!(
                names.iter().any(|n| n.starts_with(prefix)),
                "{sub} has no log file: {names:?}"
            );
        }

        // a second global subscriber is refused
        assert!(init_logger("info", false).is_err());
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_audit_record_fields() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            crate::audit_log!("update_role", "user:12", "admin");
        });

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains(r#""target":"audit""#), "{out}");
        assert!(out.contains(r#""action":"update_role""#), "{out}");
        assert!(out.contains(r#""resource":"user:12""#), "{out}");
        assert!(out.contains(r#""details":"admin""#), "{out}");
        assert!(!out.contains("user_id"), "{out}");
    }
}
