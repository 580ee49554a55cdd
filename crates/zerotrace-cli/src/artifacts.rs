//! Build artifacts: directive variants and integration documents.
//!
//! [`plan_artifacts`] computes every file `zerotrace build` produces without
//! touching the filesystem; [`write_artifacts`] writes a plan out.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::Instrument;
use zerotrace_common_log::spans::{artifact_span, record_error};
use zerotrace_directive::{VariantGenerator, CORE_VARIANT, SHORT_VARIANT};

use crate::error::CliError;

pub const PROMPTS_DIR: &str = "prompts";
pub const INTEGRATIONS_DIR: &str = "integrations";
pub const CHATGPT_DOCUMENT: &str = "chatgpt-custom-instructions.md";
pub const API_DOCUMENT: &str = "api-integration.md";

/// What an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Variant,
    Integration,
}

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    #[serde(skip)]
    pub contents: String,
}

/// All build outputs, in write order: `core`, `short`, each configuration in
/// registry order, then the two integration documents.
pub fn plan_artifacts(
    generator: &VariantGenerator,
    output_dir: &Path,
    templates_dir: &Path,
) -> Vec<Artifact> {
    let prompts = output_dir.join(PROMPTS_DIR);
    let integrations = templates_dir.join(INTEGRATIONS_DIR);
    let canonical = generator.registry().canonical().as_str();

    let variant = |name: &str, contents: String| Artifact {
        path: prompts.join(format!("{name}.txt")),
        kind: ArtifactKind::Variant,
        contents,
    };

    let mut artifacts = vec![
        variant(CORE_VARIANT, canonical.to_string()),
        variant(SHORT_VARIANT, generator.short_variant().into_string()),
    ];
    artifacts.extend(
        generator
            .all_configuration_variants()
            .into_iter()
            .map(|(key, directive)| variant(&key, directive.into_string())),
    );

    artifacts.push(Artifact {
        path: integrations.join(CHATGPT_DOCUMENT),
        kind: ArtifactKind::Integration,
        contents: chatgpt_document(canonical),
    });
    artifacts.push(Artifact {
        path: integrations.join(API_DOCUMENT),
        kind: ArtifactKind::Integration,
        contents: api_document(canonical),
    });

    artifacts
}

/// Write every artifact, creating parent directories as needed.
pub async fn write_artifacts(artifacts: &[Artifact]) -> Result<(), CliError> {
    for artifact in artifacts {
        let span = artifact_span(&artifact.path.display().to_string());
        if let Err(e) = write_one(artifact).instrument(span.clone()).await {
            record_error(&span, &e);
            return Err(e);
        }
    }
    Ok(())
}

async fn write_one(artifact: &Artifact) -> Result<(), CliError> {
    if let Some(parent) = artifact.path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CliError::io_with_path("failed to create directory", e, parent))?;
    }

    tokio::fs::write(&artifact.path, &artifact.contents)
        .await
        .map_err(|e| CliError::io_with_path("failed to write artifact", e, &artifact.path))?;

    tracing::debug!(bytes = artifact.contents.len(), "artifact written");
    Ok(())
}

/// Escape `"` for embedding inside a double-quoted string literal.
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn chatgpt_document(directive: &str) -> String {
    format!(
        "# zerotrace - ChatGPT Integration

## How would you like ChatGPT to respond?

{directive}

## Additional Notes:
- This directive improves response transparency and natural style
- Responses will be labeled when uncertain information is present
- Writing style will read as more human and less like generated text

Copy the directive above into your ChatGPT Custom Instructions."
    )
}

/// API integration document with the directive embedded in string literals.
pub fn api_document(directive: &str) -> String {
    let escaped = escape_quotes(directive);
    format!(
        r#"# API Integration Template

## For OpenAI API:

```javascript
const response = await openai.chat.completions.create({{
  model: "gpt-4",
  messages: [
    {{
      "role": "system",
      "content": "{escaped}"
    }},
    {{
      "role": "user",
      "content": "Your user message here"
    }}
  ]
}});
```

## For Anthropic Claude API:

```javascript
const response = await anthropic.messages.create({{
  model: "claude-3-sonnet-20240229",
  max_tokens: 1000,
  system: "{escaped}",
  messages: [
    {{
      "role": "user",
      "content": "Your user message here"
    }}
  ]
}});
```"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zerotrace_directive::Registry;

    fn generator() -> VariantGenerator {
        VariantGenerator::new(Arc::new(Registry::builtin().unwrap()))
    }

    #[test]
    fn test_plan_has_variants_then_integrations() {
        let generator = generator();
        let plan = plan_artifacts(&generator, Path::new("dist"), Path::new("templates"));

        let paths: Vec<_> = plan.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("dist/prompts/core.txt"),
                PathBuf::from("dist/prompts/short.txt"),
                PathBuf::from("dist/prompts/academic.txt"),
                PathBuf::from("dist/prompts/technical.txt"),
                PathBuf::from("dist/prompts/creative.txt"),
                PathBuf::from("dist/prompts/casual.txt"),
                PathBuf::from("templates/integrations/chatgpt-custom-instructions.md"),
                PathBuf::from("templates/integrations/api-integration.md"),
            ]
        );

        let variants = plan.iter().filter(|a| a.kind == ArtifactKind::Variant).count();
        assert_eq!(variants, 2 + generator.registry().configurations().len());
    }

    #[test]
    fn test_variant_contents() {
        let generator = generator();
        let plan = plan_artifacts(&generator, Path::new("out"), Path::new("tpl"));
        let canonical = generator.registry().canonical().as_str();

        assert_eq!(plan[0].contents, canonical);
        assert_eq!(plan[1].contents, generator.registry().short().as_str());
        for artifact in &plan[2..6] {
            assert!(artifact.contents.starts_with(canonical));
        }
    }

    #[test]
    fn test_integration_documents_embed_directive() {
        let generator = generator();
        let plan = plan_artifacts(&generator, Path::new("out"), Path::new("tpl"));
        let canonical = generator.registry().canonical().as_str();

        let chatgpt = &plan[6].contents;
        assert!(chatgpt.contains(canonical));

        let api = &plan[7].contents;
        let escaped = escape_quotes(canonical);
        assert_eq!(api.matches(escaped.as_str()).count(), 2);
        assert!(api.contains("\\\"I cannot verify this,\\\""));
        assert!(!api.contains(canonical));
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes(r#"say "no""#), r#"say \"no\""#);
        assert_eq!(escape_quotes("plain"), "plain");
    }

    #[tokio::test]
    async fn test_write_artifacts_creates_tree() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator();
        let plan =
            plan_artifacts(&generator, &dir.path().join("dist"), &dir.path().join("templates"));

        write_artifacts(&plan).await.unwrap();

        for artifact in &plan {
            let written = std::fs::read_to_string(&artifact.path).unwrap();
            assert_eq!(written, artifact.contents);
        }
    }

    #[tokio::test]
    async fn test_write_artifacts_stops_on_blocked_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blocked"), "not a directory").unwrap();
        let plan = plan_artifacts(
            &generator(),
            &dir.path().join("blocked/dist"),
            &dir.path().join("templates"),
        );

        let err = write_artifacts(&plan).await.unwrap_err();
        assert!(matches!(err, CliError::Io { .. }), "unexpected error: {err:?}");
        assert!(!dir.path().join("templates").exists());
    }
}
