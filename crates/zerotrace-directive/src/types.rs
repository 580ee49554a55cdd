//! Registry value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable directive text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directive(String);

impl Directive {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Directive {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which aspect of the directive a configuration reinforces.
///
/// Parsing never fails: unknown values are kept as [`Emphasis::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Verification,
    Precision,
    Humanization,
    Natural,
    Unrecognized(String),
}

impl Emphasis {
    pub fn parse(value: &str) -> Self {
        match value {
            "verification" => Self::Verification,
            "precision" => Self::Precision,
            "humanization" => Self::Humanization,
            "natural" => Self::Natural,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Verification => "verification",
            Self::Precision => "precision",
            Self::Humanization => "humanization",
            Self::Natural => "natural",
            Self::Unrecognized(other) => other,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Emphasis {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A named parameter set selecting a suffix fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub key: String,
    pub display_name: String,
    pub emphasis: Emphasis,
    pub modifier_note: String,
}

/// Result of looking up an emphasis in the suffix table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix<'a> {
    Fragment(&'a str),
    None,
}

/// One suffix fragment per recognized emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmphasisSuffixTable {
    pub verification: String,
    pub precision: String,
    pub humanization: String,
    pub natural: String,
}

impl EmphasisSuffixTable {
    /// Total over [`Emphasis`]; unrecognized values map to [`Suffix::None`].
    pub fn suffix_for(&self, emphasis: &Emphasis) -> Suffix<'_> {
        match emphasis {
            Emphasis::Verification => Suffix::Fragment(&self.verification),
            Emphasis::Precision => Suffix::Fragment(&self.precision),
            Emphasis::Humanization => Suffix::Fragment(&self.humanization),
            Emphasis::Natural => Suffix::Fragment(&self.natural),
            Emphasis::Unrecognized(_) => Suffix::None,
        }
    }
}

/// Section names of the extended directive, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Verification,
    Labeling,
    Style,
    Correction,
}

impl SectionName {
    pub const ALL: [SectionName; 4] = [
        SectionName::Verification,
        SectionName::Labeling,
        SectionName::Style,
        SectionName::Correction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Labeling => "labeling",
            Self::Style => "style",
            Self::Correction => "correction",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule with its supporting items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSection {
    pub rule: String,
    pub items: Vec<String>,
}

/// Structured view of the directive, used for documentation and consistency checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedDirective {
    sections: Vec<(SectionName, RuleSection)>,
}

impl ExtendedDirective {
    pub(crate) fn new(sections: Vec<(SectionName, RuleSection)>) -> Self {
        Self { sections }
    }

    pub fn section(&self, name: SectionName) -> Option<&RuleSection> {
        self.sections
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, section)| section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &RuleSection)> {
        self.sections.iter().map(|(n, s)| (*n, s))
    }
}

/// Literal probes for the three structural markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureMarkers {
    pub verification: String,
    pub labeling: String,
    pub style: String,
}

/// A manual-testing exemplar: an input and what a conforming answer looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub category: String,
    pub input: String,
    /// Any one of these is enough.
    pub should_contain: Option<Vec<String>>,
    pub should_avoid: Option<Vec<String>>,
    pub should_trigger: Option<String>,
}

impl Scenario {
    pub fn has_criteria(&self) -> bool {
        self.should_contain.is_some()
            || self.should_avoid.is_some()
            || self.should_trigger.is_some()
    }
}
