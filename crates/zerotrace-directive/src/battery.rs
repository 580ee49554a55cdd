//! The framework battery run by `zerotrace test`.

use std::collections::HashSet;
use std::sync::Arc;

use zerotrace_test_harness::{ensure, ensure_contains, Harness};

use crate::registry::Registry;
use crate::types::SectionName;
use crate::validator::StructuralValidator;
use crate::variants::VariantGenerator;

const MIN_CORE_LENGTH: usize = 100;
const MAX_CORE_LENGTH: usize = 3000;

const ESSENTIAL_KEYWORDS: [&str; 6] = [
    "honest",
    "speculation",
    "verify",
    "label",
    "natural",
    "correction",
];

const ANTI_DETECTION_TERMS: [&str; 4] = ["contractions", "rhythm", "irregularities", "symmetry"];

const REQUIRED_LABELS: [&str; 3] = ["[Inference]", "[Speculation]", "[Unverified]"];

const SCENARIO_CATEGORIES: [&str; 4] = ["verification", "labeling", "style", "correction"];

/// Build the fixed battery of checks against `registry`, in run order.
pub fn framework_battery(registry: Arc<Registry>) -> Harness {
    let mut harness = Harness::new();

    let r = registry.clone();
    harness.register("Core directive exists and is not empty", move || {
        ensure(!r.canonical().is_empty(), "core directive is empty")
    });

    let r = registry.clone();
    harness.register("Core directive contains verification instructions", move || {
        let core = r.canonical();
        ensure(
            core.contains("cannot verify") || core.contains("unverifiable"),
            "missing verification instructions",
        )
    });

    let r = registry.clone();
    harness.register("Core directive contains labeling system", move || {
        let core = r.canonical().as_str();
        ensure_contains(core, "[Inference]", "missing [Inference] label")?;
        ensure_contains(core, "[Unverified]", "missing [Unverified] label")
    });

    let r = registry.clone();
    harness.register("Core directive contains style guidelines", move || {
        let core = r.canonical().as_str();
        ensure_contains(core, "natural flow", "missing natural flow guidance")?;
        ensure_contains(core, "contractions", "missing contractions guidance")
    });

    let r = registry.clone();
    harness.register("Core directive contains correction protocol", move || {
        ensure_contains(r.canonical().as_str(), "correction", "missing correction protocol")
    });

    let r = registry.clone();
    harness.register("Extended directive structure is valid", move || {
        for name in SectionName::ALL {
            ensure(
                r.extended().section(name).is_some(),
                format!("missing {name} section"),
            )?;
        }
        Ok(())
    });

    let r = registry.clone();
    harness.register("Extended directive has required prefixes", move || {
        let labeling = r
            .extended()
            .section(SectionName::Labeling)
            .map(|s| s.items.as_slice())
            .unwrap_or_default();
        for label in REQUIRED_LABELS {
            ensure(
                labeling.iter().any(|item| item == label),
                format!("missing {label} prefix"),
            )?;
        }
        Ok(())
    });

    let r = registry.clone();
    harness.register("Scenarios are properly structured", move || {
        ensure(!r.scenarios().is_empty(), "no scenarios defined")?;
        for (i, scenario) in r.scenarios().iter().enumerate() {
            ensure(!scenario.category.is_empty(), format!("scenario {i} missing category"))?;
            ensure(!scenario.input.is_empty(), format!("scenario {i} missing input"))?;
            ensure(
                scenario.has_criteria(),
                format!("scenario {i} missing test criteria"),
            )?;
        }
        Ok(())
    });

    let r = registry.clone();
    harness.register("Scenarios cover all categories", move || {
        let covered: HashSet<_> = r.scenarios().iter().map(|s| s.category.as_str()).collect();
        for category in SCENARIO_CATEGORIES {
            ensure(
                covered.contains(category),
                format!("missing scenarios for category: {category}"),
            )?;
        }
        Ok(())
    });

    let r = registry.clone();
    harness.register("Core directive length is reasonable", move || {
        let length = r.canonical().char_len();
        ensure(
            length >= MIN_CORE_LENGTH,
            format!("core directive too short: {length} characters"),
        )?;
        ensure(
            length <= MAX_CORE_LENGTH,
            format!("core directive too long: {length} characters"),
        )
    });

    let r = registry.clone();
    harness.register("Core directive has no formatting issues", move || {
        let core = r.canonical().as_str();
        ensure(!core.contains("\n\n"), "core directive contains blank lines")?;
        ensure(!core.starts_with(' '), "core directive starts with a space")
    });

    let r = registry.clone();
    harness.register("Core directive includes essential keywords", move || {
        let lowered = r.canonical().as_str().to_lowercase();
        for keyword in ESSENTIAL_KEYWORDS {
            ensure(
                lowered.contains(keyword),
                format!("missing essential keyword: {keyword}"),
            )?;
        }
        Ok(())
    });

    let r = registry.clone();
    harness.register("Framework includes anti-detection measures", move || {
        let lowered = r.canonical().as_str().to_lowercase();
        ensure(
            ANTI_DETECTION_TERMS.iter().any(|term| lowered.contains(term)),
            "missing anti-detection measures",
        )
    });

    let generator = VariantGenerator::new(registry.clone());
    let g = generator.clone();
    harness.register("Every configuration variant starts with the core directive", move || {
        let core = g.registry().canonical().as_str();
        for (key, variant) in g.all_configuration_variants() {
            ensure(
                variant.as_str().starts_with(core),
                format!("variant `{key}` does not start with the core directive"),
            )?;
        }
        Ok(())
    });

    let g = generator.clone();
    harness.register("Configuration variants match registry order", move || {
        let expected: Vec<_> = g
            .registry()
            .configurations()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        let actual: Vec<_> = g.all_configuration_variants().into_iter().map(|(k, _)| k).collect();
        ensure(
            actual == expected,
            format!("variant order {actual:?} differs from {expected:?}"),
        )?;
        let unique: HashSet<_> = actual.iter().collect();
        ensure(unique.len() == actual.len(), "duplicate variant keys")
    });

    let g = generator;
    harness.register("Short variant omits inference labeling detail", move || {
        ensure(
            !g.short_variant().contains("[Inference]"),
            "short variant contains [Inference]",
        )
    });

    let validator = StructuralValidator::new(registry.clone());
    let r = registry;
    harness.register("Validation of core directive is fully covered", move || {
        let report = validator.validate(r.canonical().as_str());
        let missing: Vec<_> = report.missing_keywords().collect();
        ensure(missing.is_empty(), format!("missing keywords: {}", missing.join(", ")))?;
        ensure(
            report.all_structure_present(),
            format!("structure flags incomplete: {:?}", report.structure_flags),
        )
    });

    harness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BUILTIN_FRAMEWORK;
    use zerotrace_test_harness::TestResult;

    #[test]
    fn test_battery_passes_on_builtin_registry() {
        let registry = Arc::new(Registry::builtin().unwrap());
        let run = framework_battery(registry).run_all();

        let failures: Vec<_> = run
            .failures()
            .map(|r| format!("{}: {:?}", r.name, r.error_message))
            .collect();
        assert!(failures.is_empty(), "failures: {failures:?}");
        assert_eq!(run.summary.total, 17);
        assert_eq!(run.summary.passed, 17);
    }

    #[test]
    fn test_battery_order() {
        let harness = framework_battery(Arc::new(Registry::builtin().unwrap()));
        let names: Vec<_> = harness.cases().iter().map(|c| c.name()).collect();

        assert_eq!(names.len(), 17);
        assert_eq!(names[0], "Core directive exists and is not empty");
        assert_eq!(names[9], "Core directive length is reasonable");
        assert_eq!(names[16], "Validation of core directive is fully covered");
    }

    #[test]
    fn test_battery_reports_failures_on_weak_registry() {
        let source = crate::registry::BUILTIN_FRAMEWORK.replace(
            "  - category: correction\n",
            "  - category: followup\n",
        );
        let registry = Arc::new(Registry::from_yaml(&source).unwrap());
        let run = framework_battery(registry).run_all();

        assert_eq!(run.summary.total, 17);
        assert_eq!(run.summary.failed, 1);
        let failure = run.failures().next().unwrap();
        assert_eq!(failure.name, "Scenarios cover all categories");
        assert_eq!(
            failure.error_message.as_deref(),
            Some("missing scenarios for category: correction")
        );
    }

    fn length_check_with_core_of(length: usize) -> TestResult {
        let builtin = Registry::builtin().unwrap();
        let source =
            BUILTIN_FRAMEWORK.replacen(builtin.canonical().as_str(), &"x".repeat(length), 1);
        let registry = Registry::from_yaml(&source).unwrap();
        assert_eq!(registry.canonical().char_len(), length);

        framework_battery(Arc::new(registry))
            .run_all()
            .results
            .into_iter()
            .find(|r| r.name == "Core directive length is reasonable")
            .unwrap()
    }

    #[test]
    fn test_core_length_bounds_are_inclusive() {
        assert!(length_check_with_core_of(MIN_CORE_LENGTH).passed);
        assert!(length_check_with_core_of(MAX_CORE_LENGTH).passed);
    }

    #[test]
    fn test_core_length_outside_bounds_fails() {
        let short = length_check_with_core_of(99);
        assert!(!short.passed);
        assert_eq!(
            short.error_message.as_deref(),
            Some("core directive too short: 99 characters")
        );

        let long = length_check_with_core_of(3001);
        assert!(!long.passed);
        assert_eq!(
            long.error_message.as_deref(),
            Some("core directive too long: 3001 characters")
        );
    }
}
