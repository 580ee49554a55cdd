//! The directive registry: canonical texts and rule tables.
//!
//! A [`Registry`] is built once from a YAML rule table and never mutated. The
//! generator and validator take it by `Arc` instead of reaching for globals, so
//! alternate directive sets can be loaded side by side.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DirectiveError, DirectiveResult};
use crate::types::{
    Configuration, Directive, Emphasis, EmphasisSuffixTable, ExtendedDirective, RuleSection,
    Scenario, SectionName, StructureMarkers,
};

/// Rule tables compiled into the binary.
pub const BUILTIN_FRAMEWORK: &str = include_str!("../data/framework.yaml");

/// Load-time options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Treat a configuration with an unrecognized emphasis as an integrity error.
    pub strict_emphasis: bool,
}

/// Immutable directive data.
#[derive(Debug, Clone)]
pub struct Registry {
    version: String,
    canonical: Directive,
    short: Directive,
    extended: ExtendedDirective,
    configurations: Vec<Configuration>,
    suffixes: EmphasisSuffixTable,
    required_keywords: Vec<String>,
    markers: StructureMarkers,
    scenarios: Vec<Scenario>,
}

impl Registry {
    /// The built-in directive set.
    pub fn builtin() -> DirectiveResult<Self> {
        Self::builtin_with(RegistryOptions::default())
    }

    pub fn builtin_with(options: RegistryOptions) -> DirectiveResult<Self> {
        Self::from_yaml_with(BUILTIN_FRAMEWORK, options)
    }

    pub fn from_yaml(source: &str) -> DirectiveResult<Self> {
        Self::from_yaml_with(source, RegistryOptions::default())
    }

    pub fn from_yaml_with(source: &str, options: RegistryOptions) -> DirectiveResult<Self> {
        let raw: RawRegistry = serde_yaml::from_str(source)?;
        let registry = raw.into_registry(options)?;
        tracing::debug!(
            version = %registry.version,
            configurations = registry.configurations.len(),
            keywords = registry.required_keywords.len(),
            scenarios = registry.scenarios.len(),
            "registry loaded"
        );
        Ok(registry)
    }

    /// Load an alternate directive set from disk.
    pub fn load(path: impl AsRef<Path>, options: RegistryOptions) -> DirectiveResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DirectiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_with(&source, options)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn canonical(&self) -> &Directive {
        &self.canonical
    }

    /// Hand-authored condensation. Not derived from, and not a superstring of, the canonical text.
    pub fn short(&self) -> &Directive {
        &self.short
    }

    pub fn extended(&self) -> &ExtendedDirective {
        &self.extended
    }

    /// Configurations in registration order.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn configuration(&self, key: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.key == key)
    }

    pub fn suffixes(&self) -> &EmphasisSuffixTable {
        &self.suffixes
    }

    pub fn required_keywords(&self) -> &[String] {
        &self.required_keywords
    }

    pub fn markers(&self) -> &StructureMarkers {
        &self.markers
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }
}

// Raw shapes mirror the YAML with every field optional so that a missing
// field surfaces as a StructuralIntegrity error naming it, not a serde error.

#[derive(Debug, Deserialize)]
struct RawRegistry {
    version: Option<String>,
    directive: Option<RawDirective>,
    extended: Option<RawExtended>,
    #[serde(default)]
    configurations: Vec<RawConfiguration>,
    suffixes: Option<RawSuffixes>,
    validation: Option<RawValidation>,
    #[serde(default)]
    scenarios: Vec<RawScenario>,
}

#[derive(Debug, Deserialize)]
struct RawDirective {
    canonical: Option<String>,
    short: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExtended {
    verification: Option<RawSection>,
    labeling: Option<RawSection>,
    style: Option<RawSection>,
    correction: Option<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    rule: Option<String>,
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    key: Option<String>,
    name: Option<String>,
    emphasis: Option<String>,
    #[serde(default)]
    modifiers: String,
}

#[derive(Debug, Deserialize)]
struct RawSuffixes {
    verification: Option<String>,
    precision: Option<String>,
    humanization: Option<String>,
    natural: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawValidation {
    #[serde(default)]
    required_keywords: Vec<String>,
    markers: Option<RawMarkers>,
}

#[derive(Debug, Deserialize)]
struct RawMarkers {
    verification: Option<String>,
    labeling: Option<String>,
    style: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    category: Option<String>,
    input: Option<String>,
    should_contain: Option<Vec<String>>,
    should_avoid: Option<Vec<String>>,
    should_trigger: Option<String>,
}

fn required(value: Option<String>, field: &str) -> DirectiveResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(DirectiveError::integrity(field, "must not be empty")),
        None => Err(DirectiveError::missing(field)),
    }
}

impl RawRegistry {
    fn into_registry(self, options: RegistryOptions) -> DirectiveResult<Registry> {
        let version = required(self.version, "version")?;

        let directive = self.directive.ok_or_else(|| DirectiveError::missing("directive"))?;
        let canonical = Directive::new(required(directive.canonical, "directive.canonical")?);
        let short = Directive::new(required(directive.short, "directive.short")?);

        let extended = self
            .extended
            .ok_or_else(|| DirectiveError::missing("extended"))?
            .into_extended()?;

        let configurations = convert_configurations(self.configurations, options)?;

        let suffixes = self
            .suffixes
            .ok_or_else(|| DirectiveError::missing("suffixes"))?
            .into_table()?;

        let validation = self.validation.ok_or_else(|| DirectiveError::missing("validation"))?;
        if validation.required_keywords.is_empty() {
            return Err(DirectiveError::integrity(
                "validation.required_keywords",
                "at least one keyword is required",
            ));
        }
        if let Some(i) = validation.required_keywords.iter().position(|k| k.is_empty()) {
            return Err(DirectiveError::integrity(
                format!("validation.required_keywords[{i}]"),
                "must not be empty",
            ));
        }
        let markers = validation
            .markers
            .ok_or_else(|| DirectiveError::missing("validation.markers"))?
            .into_markers()?;

        let scenarios = self
            .scenarios
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_scenario(i))
            .collect::<DirectiveResult<Vec<_>>>()?;

        Ok(Registry {
            version,
            canonical,
            short,
            extended,
            configurations,
            suffixes,
            required_keywords: validation.required_keywords,
            markers,
            scenarios,
        })
    }
}

fn convert_configurations(
    raw: Vec<RawConfiguration>,
    options: RegistryOptions,
) -> DirectiveResult<Vec<Configuration>> {
    let mut seen = HashSet::new();
    let mut configurations = Vec::with_capacity(raw.len());

    for (i, raw) in raw.into_iter().enumerate() {
        let key = required(raw.key, &format!("configurations[{i}].key"))?;
        if !seen.insert(key.clone()) {
            return Err(DirectiveError::integrity(
                format!("configurations[{i}].key"),
                format!("duplicate configuration key `{key}`"),
            ));
        }

        let display_name = required(raw.name, &format!("configurations[{i}].name"))?;
        let emphasis = Emphasis::parse(&required(
            raw.emphasis,
            &format!("configurations[{i}].emphasis"),
        )?);

        if !emphasis.is_recognized() {
            if options.strict_emphasis {
                return Err(DirectiveError::integrity(
                    format!("configurations[{i}].emphasis"),
                    format!("unrecognized emphasis `{emphasis}` for configuration `{key}`"),
                ));
            }
            tracing::warn!(
                configuration = %key,
                emphasis = %emphasis,
                "unrecognized emphasis, variant will equal the canonical directive"
            );
        }

        configurations.push(Configuration {
            key,
            display_name,
            emphasis,
            modifier_note: raw.modifiers,
        });
    }

    Ok(configurations)
}

impl RawExtended {
    fn into_extended(self) -> DirectiveResult<ExtendedDirective> {
        let mut sections = Vec::with_capacity(SectionName::ALL.len());
        let raw = [
            (SectionName::Verification, self.verification),
            (SectionName::Labeling, self.labeling),
            (SectionName::Style, self.style),
            (SectionName::Correction, self.correction),
        ];

        for (name, section) in raw {
            let field = format!("extended.{name}");
            let section = section.ok_or_else(|| DirectiveError::missing(&field))?;
            sections.push((
                name,
                RuleSection {
                    rule: required(section.rule, &format!("{field}.rule"))?,
                    items: section.items,
                },
            ));
        }

        Ok(ExtendedDirective::new(sections))
    }
}

impl RawSuffixes {
    fn into_table(self) -> DirectiveResult<EmphasisSuffixTable> {
        Ok(EmphasisSuffixTable {
            verification: required(self.verification, "suffixes.verification")?,
            precision: required(self.precision, "suffixes.precision")?,
            humanization: required(self.humanization, "suffixes.humanization")?,
            natural: required(self.natural, "suffixes.natural")?,
        })
    }
}

impl RawMarkers {
    fn into_markers(self) -> DirectiveResult<StructureMarkers> {
        Ok(StructureMarkers {
            verification: required(self.verification, "validation.markers.verification")?,
            labeling: required(self.labeling, "validation.markers.labeling")?,
            style: required(self.style, "validation.markers.style")?,
        })
    }
}

impl RawScenario {
    fn into_scenario(self, index: usize) -> DirectiveResult<Scenario> {
        Ok(Scenario {
            category: required(self.category, &format!("scenarios[{index}].category"))?,
            input: required(self.input, &format!("scenarios[{index}].input"))?,
            should_contain: self.should_contain,
            should_avoid: self.should_avoid,
            should_trigger: self.should_trigger,
        })
    }
}
