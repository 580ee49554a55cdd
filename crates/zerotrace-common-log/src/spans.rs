//! Span and timing utilities.

use tracing::{info_span, Span};

/// Create a span for work on one directive text (core, short, or a configuration key).
pub fn directive_span(name: &str) -> Span {
    info_span!("directive", name = %name)
}

/// Create a span for a single structural check.
pub fn check_span(check: &str) -> Span {
    info_span!("check", name = %check)
}

/// Create a span for writing a generated artifact.
///
/// The span declares an empty `error` field filled in by [`record_error`].
pub fn artifact_span(path: &str) -> Span {
    info_span!("artifact", path = %path, error = tracing::field::Empty)
}

/// Record `error` on `span`. Only spans that declare an `error` field keep it.
pub fn record_error(span: &Span, error: &dyn std::error::Error) {
    span.record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Elapsed time so far.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Complete the timer and record duration.
    pub fn finish(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_span_nesting() {
        with_subscriber(|| {
            let directive = directive_span("academic");
            let _guard1 = directive.enter();

            let check = check_span("keyword_coverage");
            let _guard2 = check.enter();

            tracing::info!("nested check");
        });
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_error_on_artifact_span() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let span = artifact_span("dist/prompts/core.txt");
            assert!(span.has_field("error"));

            let error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
            record_error(&span, &error);

            let _guard = span.enter();
            tracing::info!("artifact write attempted");
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("error=read-only"), "output: {output}");
    }

    #[test]
    fn test_check_span_has_no_error_field() {
        with_subscriber(|| {
            assert!(!check_span("keyword_coverage").has_field("error"));
        });
    }

    #[test]
    fn test_timer_reports_elapsed() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.elapsed().as_millis() >= 5);
        let total = timer.finish();
        assert!(total.as_millis() >= 5);
    }
}
