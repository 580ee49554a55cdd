//! Command implementations.

mod build;
mod info;
mod init;
mod show;
mod validate;

pub use build::BuildCommand;
pub use info::InfoCommand;
pub use init::InitCommand;
pub use show::ShowCommand;
pub use test::TestCommand;
pub use validate::ValidateCommand;

use std::sync::Arc;

use zerotrace_directive::{Directive, Registry, VariantGenerator};

use crate::error::CliError;

/// Resolve a variant name, suggesting the valid names when it is unknown.
pub(crate) fn resolve_variant(registry: &Arc<Registry>, name: &str) -> Result<Directive, CliError> {
    let generator = VariantGenerator::new(registry.clone());
    generator.variant_by_name(name).ok_or_else(|| {
        CliError::not_found_with_suggestions("variant", name, generator.variant_names())
    })
}
