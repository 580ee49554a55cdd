//! Variant generation.
//!
//! Every configuration variant is the canonical directive followed by a single
//! space and the emphasis suffix, so the canonical text is always a prefix.
//! The short variant is the exception: it is authored separately and is not a
//! superstring of the canonical text.

use std::sync::Arc;

use crate::registry::Registry;
use crate::types::{Configuration, Directive, Suffix};

/// Name resolving to the canonical directive in [`VariantGenerator::variant_by_name`].
pub const CORE_VARIANT: &str = "core";
/// Name resolving to the short variant in [`VariantGenerator::variant_by_name`].
pub const SHORT_VARIANT: &str = "short";

/// Derives directive variants from an injected registry.
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    registry: Arc<Registry>,
}

impl VariantGenerator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The fixed, hand-authored condensation of the canonical directive.
    pub fn short_variant(&self) -> Directive {
        self.registry.short().clone()
    }

    /// `canonical + " " + suffix`, or the canonical text unchanged when the
    /// emphasis has no suffix.
    pub fn variant_for_configuration(&self, config: &Configuration) -> Directive {
        let canonical = self.registry.canonical();
        match self.registry.suffixes().suffix_for(&config.emphasis) {
            Suffix::Fragment(suffix) => Directive::new(format!("{canonical} {suffix}")),
            Suffix::None => {
                tracing::warn!(
                    configuration = %config.key,
                    emphasis = %config.emphasis,
                    "no suffix for emphasis, using canonical directive"
                );
                canonical.clone()
            }
        }
    }

    /// One `(key, variant)` per configuration, in registry order.
    pub fn all_configuration_variants(&self) -> Vec<(String, Directive)> {
        self.registry
            .configurations()
            .iter()
            .map(|config| (config.key.clone(), self.variant_for_configuration(config)))
            .collect()
    }

    /// Resolve `core`, `short`, or a configuration key.
    pub fn variant_by_name(&self, name: &str) -> Option<Directive> {
        match name {
            CORE_VARIANT => Some(self.registry.canonical().clone()),
            SHORT_VARIANT => Some(self.short_variant()),
            key => self
                .registry
                .configuration(key)
                .map(|config| self.variant_for_configuration(config)),
        }
    }

    /// Every name accepted by [`Self::variant_by_name`], in artifact order.
    pub fn variant_names(&self) -> Vec<String> {
        [CORE_VARIANT, SHORT_VARIANT]
            .into_iter()
            .map(str::to_string)
            .chain(self.registry.configurations().iter().map(|c| c.key.clone()))
            .collect()
    }
}
