use crate::core::{Package, Storage};
use crate::utils::error::{AdvisorError, Result};
use serde::Serialize;

pub const PACKAGES_PLACEHOLDER: &str = "{packages_text}";

const BUILTIN_TEMPLATE: &str = "\
You are a professional customer service advisor for a web design company.
Your job is to help clients choose the best website package based on their needs.

CURRENT PACKAGES AVAILABLE:
{packages_text}

GUIDELINES:
1. Always recommend based on the client's specific business needs
2. Mention exact prices and features from the package data
3. Be honest about limitations
4. Suggest the most cost-effective option that meets their requirements
5. If the requirements are unclear, ask a clarifying question before recommending

IMPORTANT: Only recommend packages that exist in the data above. Never make up packages or prices.
";

/// Where the instructional scaffold comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    /// Path relative to the storage root, re-read on every build.
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt(String);

impl SystemPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct PromptBuilder<S: Storage> {
    storage: S,
    source: TemplateSource,
}

impl<S: Storage> PromptBuilder<S> {
    pub fn new(storage: S, source: TemplateSource) -> Self {
        Self { storage, source }
    }

    /// Renders the grounding prompt for the given packages. Any failure comes
    /// back as `PromptUnavailable` so callers can fall back to keyword matches.
    pub async fn build(&self, packages: &[Package]) -> Result<SystemPrompt> {
        let template = self.load_template().await?;
        let block = render_packages_block(packages)?;
        render_template(&template, &block)
    }

    async fn load_template(&self) -> Result<String> {
        match &self.source {
            TemplateSource::Builtin => Ok(BUILTIN_TEMPLATE.to_string()),
            TemplateSource::File(path) => {
                let bytes = self.storage.read_file(path).await.map_err(|e| {
                    AdvisorError::PromptUnavailable {
                        reason: format!("cannot read template {}: {}", path, e),
                    }
                })?;
                String::from_utf8(bytes).map_err(|_| AdvisorError::PromptUnavailable {
                    reason: format!("template {} is not valid UTF-8", path),
                })
            }
        }
    }
}

/// Pretty JSON with two-space indentation; non-ASCII text is kept as is.
pub fn render_packages_block(packages: &[Package]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    packages
        .serialize(&mut serializer)
        .map_err(|e| AdvisorError::PromptUnavailable {
            reason: format!("cannot serialize packages: {}", e),
        })?;
    String::from_utf8(buf).map_err(|e| AdvisorError::PromptUnavailable {
        reason: e.to_string(),
    })
}

pub fn render_template(template: &str, packages_block: &str) -> Result<SystemPrompt> {
    match template.matches(PACKAGES_PLACEHOLDER).count() {
        1 => Ok(SystemPrompt(
            template.replacen(PACKAGES_PLACEHOLDER, packages_block, 1),
        )),
        0 => Err(AdvisorError::PromptUnavailable {
            reason: format!("template has no {} placeholder", PACKAGES_PLACEHOLDER),
        }),
        n => Err(AdvisorError::PromptUnavailable {
            reason: format!(
                "template has {} {} placeholders, expected exactly one",
                n, PACKAGES_PLACEHOLDER
            ),
        }),
    }
}
