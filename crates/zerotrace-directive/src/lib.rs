//! zerotrace directive engine
//!
//! Holds the canonical directive and its rule tables ([`Registry`]), derives
//! configuration variants from it ([`VariantGenerator`]) and scores any
//! directive text against a fixed structural checklist
//! ([`StructuralValidator`]).
//!
//! ```
//! use std::sync::Arc;
//! use zerotrace_directive::{Registry, StructuralValidator, VariantGenerator};
//!
//! let registry = Arc::new(Registry::builtin()?);
//! let generator = VariantGenerator::new(registry.clone());
//! let validator = StructuralValidator::new(registry.clone());
//!
//! for (key, variant) in generator.all_configuration_variants() {
//!     let report = validator.validate(variant.as_str());
//!     println!("{key}: {:.1}%", report.keyword_coverage_pct);
//! }
//! # Ok::<(), zerotrace_directive::DirectiveError>(())
//! ```

pub mod battery;
pub mod error;
pub mod registry;
pub mod types;
pub mod validator;
pub mod variants;

pub use battery::framework_battery;
pub use error::{DirectiveError, DirectiveResult};
pub use registry::{Registry, RegistryOptions, BUILTIN_FRAMEWORK};
pub use types::{
    Configuration, Directive, Emphasis, EmphasisSuffixTable, ExtendedDirective, RuleSection,
    Scenario, SectionName, StructureMarkers, Suffix,
};
pub use validator::{
    CoverageClass, KeywordResult, LengthVerdict, StructuralValidator, StructureFlags,
    ValidationReport, OPTIMAL_LENGTH_LIMIT, PASSING_COVERAGE_PCT,
};
pub use variants::{VariantGenerator, CORE_VARIANT, SHORT_VARIANT};
