//! Presentation of directives, validation reports and test results.
//!
//! Everything here is a pure function from engine values to strings. Commands
//! decide where the strings go.

use std::fmt::Write;

use serde::Serialize;
use zerotrace_directive::{
    CoverageClass, Directive, LengthVerdict, Scenario, ValidationReport, OPTIMAL_LENGTH_LIMIT,
};
use zerotrace_test_harness::{TestResult, TestSummary};

use crate::output::IconContext;

const RULE_WIDTH: usize = 80;

/// Literal formats for `zerotrace show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ShowFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

#[derive(Serialize)]
struct EmbeddedDirective<'a> {
    version: &'a str,
    prompt: &'a str,
}

/// Render a directive in one of the three `show` formats.
pub fn show(
    directive: &Directive,
    version: &str,
    format: ShowFormat,
    icons: &IconContext,
) -> Result<String, serde_json::Error> {
    let text = directive.as_str();
    Ok(match format {
        ShowFormat::Json => serde_json::to_string(&EmbeddedDirective {
            version,
            prompt: text,
        })?,
        ShowFormat::Markdown => format!("```\n{text}\n```"),
        ShowFormat::Text => {
            let rule = icons.rule(RULE_WIDTH);
            format!(
                "{rule}\n{text}\n{rule}\n\nLength: {} characters",
                directive.char_len()
            )
        }
    })
}

/// Static checks section of a validation report.
pub fn validation_report(report: &ValidationReport, icons: &IconContext) -> String {
    let mut out = String::new();

    let (icon, verdict) = match report.length_verdict {
        LengthVerdict::Optimal => (icons.check(), "optimal for most models".to_string()),
        LengthVerdict::Long => (
            icons.warning(),
            format!("over {OPTIMAL_LENGTH_LIMIT}, may be too long for some models"),
        ),
    };
    writeln!(out, "{icon} Length ({} chars) - {verdict}", report.length_chars).ok();

    out.push_str("\nKeywords:\n");
    for result in &report.keyword_results {
        let verb = if result.present { "Contains" } else { "Missing" };
        writeln!(
            out,
            "  {} {verb} keyword: \"{}\"",
            icons.mark(result.present),
            result.keyword
        )
        .ok();
    }

    let class = match report.coverage_class {
        CoverageClass::Passing => "passing",
        CoverageClass::Warning => "warning",
    };
    writeln!(
        out,
        "\nKeyword coverage: {:.1}% ({}/{}, {class})",
        report.keyword_coverage_pct,
        report.present_count(),
        report.keyword_results.len()
    )
    .ok();

    let flags = &report.structure_flags;
    out.push_str("\nStructure:\n");
    for (label, present) in [
        ("Verification protocols", flags.has_verification),
        ("Labeling system", flags.has_labeling),
        ("Style guidelines", flags.has_style),
    ] {
        writeln!(out, "  {label}: {}", icons.mark(present)).ok();
    }

    out
}

/// Manual-testing guidance for each scenario. Purely descriptive.
pub fn scenarios(scenarios: &[Scenario]) -> String {
    let mut out = String::new();

    for (i, scenario) in scenarios.iter().enumerate() {
        writeln!(out, "{}. {} TEST:", i + 1, scenario.category.to_uppercase()).ok();
        writeln!(out, "   Input: \"{}\"", scenario.input).ok();
        if let Some(contain) = &scenario.should_contain {
            writeln!(out, "   Should contain: {}", contain.join(" OR ")).ok();
        }
        if let Some(avoid) = &scenario.should_avoid {
            writeln!(out, "   Should avoid: {}", avoid.join(", ")).ok();
        }
        if let Some(trigger) = &scenario.should_trigger {
            writeln!(out, "   Should trigger: {trigger}").ok();
        }
        out.push('\n');
    }

    out.push_str(
        "To test manually:\n\
         1. Copy the directive above\n\
         2. Use it as the system prompt of your model\n\
         3. Send each input above\n\
         4. Check the responses against the expected behaviors\n",
    );

    out
}

/// One line per executed test case.
pub fn test_result(result: &TestResult, icons: &IconContext) -> String {
    match &result.error_message {
        None if result.passed => format!("{} {}", icons.check(), result.name),
        message => format!(
            "{} {}: {}",
            icons.cross(),
            result.name,
            message.as_deref().unwrap_or("failed")
        ),
    }
}

pub fn test_summary(summary: &TestSummary) -> String {
    let rate = if summary.total == 0 {
        100.0
    } else {
        100.0 * summary.passed as f64 / summary.total as f64
    };
    format!(
        "Passed: {}\nFailed: {}\nTotal: {}\nSuccess rate: {rate:.1}%",
        summary.passed, summary.failed, summary.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zerotrace_directive::{Registry, StructuralValidator};

    fn registry() -> Arc<Registry> {
        Arc::new(Registry::builtin().unwrap())
    }

    #[test]
    fn test_show_text_reports_length() {
        let registry = registry();
        let out = show(
            registry.canonical(),
            registry.version(),
            ShowFormat::Text,
            &IconContext::ascii(),
        )
        .unwrap();

        assert!(out.starts_with(&"-".repeat(80)));
        assert!(out.contains(registry.canonical().as_str()));
        assert!(out.ends_with(&format!(
            "Length: {} characters",
            registry.canonical().char_len()
        )));
    }

    #[test]
    fn test_show_json_is_single_line() {
        let directive = Directive::new("Say \"hi\".");
        let out = show(&directive, "1.0.0", ShowFormat::Json, &IconContext::ascii()).unwrap();

        assert!(!out.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["prompt"], "Say \"hi\".");
    }

    #[test]
    fn test_show_markdown_fences() {
        let directive = Directive::new("Be honest.");
        let out = show(&directive, "1.0.0", ShowFormat::Markdown, &IconContext::ascii()).unwrap();
        assert_eq!(out, "```\nBe honest.\n```");
    }

    #[test]
    fn test_validation_report_lists_every_check() {
        let registry = registry();
        let report = StructuralValidator::new(registry.clone()).validate(registry.short().as_str());
        let out = validation_report(&report, &IconContext::ascii());

        assert!(out.contains("[ok] Length (248 chars)"));
        assert!(out.contains("[err] Missing keyword: \"Inference\""));
        assert!(out.contains("[ok] Contains keyword: \"honest\""));
        assert!(out.contains("Keyword coverage: 44.4% (4/9, warning)"));
        assert!(out.contains("Labeling system: [err]"));
        assert!(out.contains("Style guidelines: [ok]"));
    }

    #[test]
    fn test_long_text_is_flagged() {
        let registry = registry();
        let report = StructuralValidator::new(registry).validate(&"x".repeat(2500));
        let out = validation_report(&report, &IconContext::ascii());
        assert!(out.starts_with("[warn] Length (2500 chars)"));
    }

    #[test]
    fn test_scenarios_render_hints() {
        let out = scenarios(registry().scenarios());

        assert!(out.contains("1. VERIFICATION TEST:"));
        assert!(out.contains("   Input: \"What will the weather be tomorrow?\""));
        assert!(
            out.contains("Should contain: [Unverified] OR I cannot verify OR do not have access")
        );
        assert!(out.contains(
            "Should avoid: Furthermore, It should be noted, In conclusion, comprehensive"
        ));
        assert!(out.contains("Should trigger: correction"));
    }

    #[test]
    fn test_result_lines() {
        let icons = IconContext::ascii();
        let passed = TestResult {
            name: "a".into(),
            passed: true,
            error_message: None,
            duration_ms: 0,
        };
        let failed = TestResult {
            name: "b".into(),
            passed: false,
            error_message: Some("missing label".into()),
            duration_ms: 0,
        };

        assert_eq!(test_result(&passed, &icons), "[ok] a");
        assert_eq!(test_result(&failed, &icons), "[err] b: missing label");
    }

    #[test]
    fn test_summary_rate() {
        let summary = TestSummary {
            passed: 3,
            failed: 1,
            total: 4,
        };
        assert!(test_summary(&summary).ends_with("Success rate: 75.0%"));
        assert!(test_summary(&TestSummary::default()).ends_with("Success rate: 100.0%"));
    }
}
