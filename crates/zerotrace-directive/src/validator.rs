//! Structural validation of directive texts.
//!
//! [`StructuralValidator::validate`] always runs every check and always returns
//! a report. Low coverage and excessive length are classifications on the
//! report, not errors; the caller decides what they mean.

use std::sync::Arc;

use serde::Serialize;
use zerotrace_common_log::spans::{check_span, Timer};

use crate::registry::Registry;

/// Texts at or above this many characters are classified [`LengthVerdict::Long`].
pub const OPTIMAL_LENGTH_LIMIT: usize = 2000;

/// Minimum keyword coverage for a [`CoverageClass::Passing`] classification.
pub const PASSING_COVERAGE_PCT: f64 = 90.0;

/// Length classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthVerdict {
    Optimal,
    Long,
}

/// Keyword coverage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageClass {
    Passing,
    Warning,
}

/// Presence of one required keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub present: bool,
}

/// Presence of the three structural markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureFlags {
    /// Verification-refusal phrase.
    pub has_verification: bool,
    /// Uncertainty label marker.
    pub has_labeling: bool,
    /// Natural-style phrase.
    pub has_style: bool,
}

impl StructureFlags {
    pub fn all(&self) -> bool {
        self.has_verification && self.has_labeling && self.has_style
    }
}

/// Outcome of validating one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Length in characters.
    pub length_chars: usize,
    pub length_verdict: LengthVerdict,
    /// One entry per required keyword, in registry order.
    pub keyword_results: Vec<KeywordResult>,
    /// Share of required keywords present, in `[0, 100]`.
    pub keyword_coverage_pct: f64,
    pub coverage_class: CoverageClass,
    pub structure_flags: StructureFlags,
}

impl ValidationReport {
    pub fn missing_keywords(&self) -> impl Iterator<Item = &str> {
        self.keyword_results
            .iter()
            .filter(|r| !r.present)
            .map(|r| r.keyword.as_str())
    }

    pub fn present_count(&self) -> usize {
        self.keyword_results.iter().filter(|r| r.present).count()
    }

    pub fn is_passing(&self) -> bool {
        self.coverage_class == CoverageClass::Passing
    }

    pub fn all_structure_present(&self) -> bool {
        self.structure_flags.all()
    }
}

/// Scores texts against the registry's keyword list and structure markers.
#[derive(Debug, Clone)]
pub struct StructuralValidator {
    registry: Arc<Registry>,
}

impl StructuralValidator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn validate(&self, text: &str) -> ValidationReport {
        let timer = Timer::start("validate");

        let length_chars = check_length(text);
        let length_verdict = if length_chars < OPTIMAL_LENGTH_LIMIT {
            LengthVerdict::Optimal
        } else {
            LengthVerdict::Long
        };

        let keyword_results = self.check_keywords(text);
        let keyword_coverage_pct = coverage_pct(&keyword_results);
        let coverage_class = if keyword_coverage_pct >= PASSING_COVERAGE_PCT {
            CoverageClass::Passing
        } else {
            CoverageClass::Warning
        };

        let structure_flags = self.check_structure(text);

        tracing::debug!(
            length_chars,
            coverage = keyword_coverage_pct,
            ?coverage_class,
            structure_complete = structure_flags.all(),
            "validation complete"
        );
        timer.finish();

        ValidationReport {
            length_chars,
            length_verdict,
            keyword_results,
            keyword_coverage_pct,
            coverage_class,
            structure_flags,
        }
    }

    fn check_keywords(&self, text: &str) -> Vec<KeywordResult> {
        let _span = check_span("keywords").entered();
        self.registry
            .required_keywords()
            .iter()
            .map(|keyword| KeywordResult {
                keyword: keyword.clone(),
                present: text.contains(keyword.as_str()),
            })
            .collect()
    }

    fn check_structure(&self, text: &str) -> StructureFlags {
        let _span = check_span("structure").entered();
        let markers = self.registry.markers();
        StructureFlags {
            has_verification: text.contains(markers.verification.as_str()),
            has_labeling: text.contains(markers.labeling.as_str()),
            has_style: text.contains(markers.style.as_str()),
        }
    }
}

fn check_length(text: &str) -> usize {
    let _span = check_span("length").entered();
    text.chars().count()
}

fn coverage_pct(results: &[KeywordResult]) -> f64 {
    if results.is_empty() {
        return 100.0;
    }
    let present = results.iter().filter(|r| r.present).count();
    100.0 * present as f64 / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn validator() -> StructuralValidator {
        StructuralValidator::new(Arc::new(Registry::builtin().unwrap()))
    }

    #[test]
    fn test_canonical_is_fully_covered() {
        let registry = Arc::new(Registry::builtin().unwrap());
        let report =
            StructuralValidator::new(registry.clone()).validate(registry.canonical().as_str());

        assert_eq!(report.keyword_coverage_pct, 100.0);
        assert!(report.is_passing());
        assert!(report.all_structure_present());
        assert_eq!(report.length_verdict, LengthVerdict::Optimal);
        assert_eq!(report.length_chars, registry.canonical().char_len());
        assert_eq!(report.missing_keywords().count(), 0);
    }

    #[test]
    fn test_empty_text() {
        let report = validator().validate("");

        assert_eq!(report.length_chars, 0);
        assert_eq!(report.length_verdict, LengthVerdict::Optimal);
        assert_eq!(report.keyword_coverage_pct, 0.0);
        assert_eq!(report.coverage_class, CoverageClass::Warning);
        assert_eq!(report.structure_flags, StructureFlags::default());
        assert_eq!(report.keyword_results.len(), 9);
    }

    #[test]
    fn test_length_threshold_is_exclusive() {
        let validator = validator();
        assert_eq!(
            validator.validate(&"a".repeat(1999)).length_verdict,
            LengthVerdict::Optimal
        );
        assert_eq!(
            validator.validate(&"a".repeat(2000)).length_verdict,
            LengthVerdict::Long
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let report = validator().validate(&"é".repeat(1500));
        assert_eq!(report.length_chars, 1500);
        assert_eq!(report.length_verdict, LengthVerdict::Optimal);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let report = validator().validate("HONEST speculation");
        let present: Vec<_> = report
            .keyword_results
            .iter()
            .filter(|r| r.present)
            .map(|r| r.keyword.as_str())
            .collect();
        assert_eq!(present, vec!["speculation"]);
        assert_eq!(report.present_count(), 1);
    }

    #[test]
    fn test_short_variant_is_a_warning() {
        let registry = Arc::new(Registry::builtin().unwrap());
        let report = StructuralValidator::new(registry.clone()).validate(registry.short().as_str());

        assert_eq!(report.coverage_class, CoverageClass::Warning);
        assert!(!report.structure_flags.has_labeling);
        assert!(report.structure_flags.has_style);
        assert!(report.missing_keywords().any(|k| k == "Inference"));
    }

    #[test]
    fn test_checks_are_independent() {
        let report = validator().validate("natural flow");
        assert!(report.structure_flags.has_style);
        assert!(!report.structure_flags.has_verification);
        assert!(!report.structure_flags.has_labeling);
        assert_eq!(report.present_count(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let report = validator().validate("honest");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["length_verdict"], "optimal");
        assert_eq!(json["coverage_class"], "warning");
        assert_eq!(json["structure_flags"]["has_labeling"], false);
        assert_eq!(json["keyword_results"][0]["keyword"], "honest");
        assert_eq!(json["keyword_results"][0]["present"], true);
    }

    proptest! {
        #[test]
        fn prop_validate_is_deterministic(text in "\\PC{0,300}") {
            let validator = validator();
            prop_assert_eq!(validator.validate(&text), validator.validate(&text));
        }

        #[test]
        fn prop_coverage_is_bounded(text in "\\PC{0,300}") {
            let report = validator().validate(&text);
            prop_assert!((0.0..=100.0).contains(&report.keyword_coverage_pct));
            let all_present = report.keyword_results.iter().all(|r| r.present);
            prop_assert_eq!(report.keyword_coverage_pct == 100.0, all_present);
        }
    }
}
