//! Project templates for `zerotrace init`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("missing template variable(s): {0}")]
    MissingVariable(String),
}

/// Built-in project templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InitTemplate {
    /// Directive, README and config
    #[default]
    Basic,
    /// Basic plus an API integration document
    Api,
}

/// A file within a template
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Relative path within the project
    pub path: PathBuf,
    /// File content (may contain variables)
    pub content: &'static str,
}

/// A rendered file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

const README: &str = "# {{project_name}}

This project uses the zerotrace directive (v{{version}}) for transparent,
natural-sounding model output.

## Directive

`directive.txt` holds the directive. Use it as the system prompt of your model.

## Validation

```bash
zerotrace validate --file directive.txt
```

## Rebuilding variants

```bash
zerotrace build
```

Created {{date}}.
";

const ENV_EXAMPLE: &str = "# Add your API keys here
OPENAI_API_KEY=your_openai_api_key_here
ANTHROPIC_API_KEY=your_anthropic_api_key_here
";

const DIRECTIVE: &str = "{{directive}}\n";

const API_INTEGRATION: &str = "{{api_integration}}\n";

impl InitTemplate {
    pub fn files(self) -> Vec<TemplateFile> {
        let mut files = vec![
            TemplateFile {
                path: PathBuf::from("README.md"),
                content: README,
            },
            TemplateFile {
                path: PathBuf::from(".env.example"),
                content: ENV_EXAMPLE,
            },
            TemplateFile {
                path: PathBuf::from("directive.txt"),
                content: DIRECTIVE,
            },
        ];

        if self == Self::Api {
            files.push(TemplateFile {
                path: PathBuf::from("integrations").join("api-integration.md"),
                content: API_INTEGRATION,
            });
        }

        files
    }
}

/// Context for template rendering
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub variables: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Create context with standard variables
    pub fn with_defaults(project_name: &str) -> Self {
        let mut ctx = Self::new();
        ctx.set("project_name", project_name);
        ctx.set("date", chrono::Utc::now().format("%Y-%m-%d").to_string());
        ctx.set("zerotrace_version", env!("CARGO_PKG_VERSION"));
        ctx
    }
}

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Match {{variable_name}} or {{ variable_name }}
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("variable pattern is a valid regex")
    })
}

/// Template renderer
#[derive(Debug, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render every file of `template`, paths relative to the project.
    pub fn render(
        &self,
        template: InitTemplate,
        context: &TemplateContext,
    ) -> Result<Vec<RenderedFile>, TemplateError> {
        template
            .files()
            .into_iter()
            .map(|file| {
                Ok(RenderedFile {
                    content: self.render_string(file.content, context)?,
                    path: file.path,
                })
            })
            .collect()
    }

    /// Render a string with variable substitution
    pub fn render_string(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let mut missing = Vec::new();

        let rendered = variable_pattern().replace_all(template, |cap: &Captures<'_>| {
            match context.get(&cap[1]) {
                Some(value) => value.clone(),
                None => {
                    missing.push(cap[1].to_string());
                    cap[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(TemplateError::MissingVariable(missing.join(", ")));
        }

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TemplateContext {
        let mut ctx = TemplateContext::with_defaults("demo");
        ctx.set("version", "1.0.0");
        ctx.set("directive", "Be honest.");
        ctx.set("api_integration", "# API");
        ctx
    }

    #[test]
    fn test_render_string_substitutes() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render_string("{{project_name}} uses {{ version }}", &context())
            .unwrap();
        assert_eq!(out, "demo uses 1.0.0");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let mut ctx = TemplateContext::new();
        ctx.set("a", "{{b}}");
        let out = TemplateRenderer::new().render_string("{{a}}", &ctx).unwrap();
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn test_missing_variables_are_reported() {
        let err = TemplateRenderer::new()
            .render_string("{{one}} {{two}}", &TemplateContext::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing template variable(s): one, two");
    }

    #[test]
    fn test_basic_template_files() {
        let files = TemplateRenderer::new().render(InitTemplate::Basic, &context()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec!["README.md", ".env.example", "directive.txt"]);
        assert!(files[0].content.starts_with("# demo\n"));
        assert_eq!(files[2].content, "Be honest.\n");
    }

    #[test]
    fn test_api_template_adds_integration() {
        let files = TemplateRenderer::new().render(InitTemplate::Api, &context()).unwrap();
        assert_eq!(files.len(), 4);
        assert_eq!(files[3].path, PathBuf::from("integrations/api-integration.md"));
        assert_eq!(files[3].content, "# API\n");
    }
}
