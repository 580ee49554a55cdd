//! Machine-readable exports of a harness run.

use serde::{Deserialize, Serialize};

use crate::harness::{TestResult, TestRun};

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Junit,
}

/// A run captured with suite metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub name: String,
    pub tests: usize,
    pub failures: usize,
    pub time_ms: u64,
    pub timestamp: String,
    pub test_cases: Vec<TestResult>,
}

impl TestReport {
    pub fn from_run(name: impl Into<String>, run: &TestRun) -> Self {
        Self {
            name: name.into(),
            tests: run.summary.total,
            failures: run.summary.failed,
            time_ms: run.results.iter().map(|r| r.duration_ms).sum(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            test_cases: run.results.clone(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Junit => Ok(self.to_junit_xml()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JUnit XML, one `<testsuite>` for the whole run.
    pub fn to_junit_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<testsuites name="{}" tests="{}" failures="{}" errors="0" time="{:.3}">"#,
            escape_xml(&self.name),
            self.tests,
            self.failures,
            self.time_ms as f64 / 1000.0
        ));
        xml.push('\n');
        xml.push_str(&format!(
            r#"  <testsuite name="{}" tests="{}" failures="{}" errors="0" skipped="0" time="{:.3}" timestamp="{}">"#,
            escape_xml(&self.name),
            self.tests,
            self.failures,
            self.time_ms as f64 / 1000.0,
            self.timestamp
        ));
        xml.push('\n');

        for test in &self.test_cases {
            xml.push_str(&format!(
                r#"    <testcase name="{}" classname="{}" time="{:.3}">"#,
                escape_xml(&test.name),
                escape_xml(&self.name),
                test.duration_ms as f64 / 1000.0
            ));
            xml.push('\n');

            if !test.passed {
                xml.push_str(&format!(
                    r#"      <failure message="{}"/>"#,
                    escape_xml(test.error_message.as_deref().unwrap_or(""))
                ));
                xml.push('\n');
            }

            xml.push_str("    </testcase>\n");
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
