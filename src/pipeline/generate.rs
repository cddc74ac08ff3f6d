//! Document generation: chat-completion call plus response normalisation.
//!
//! This module is intentionally thin — all prompt text lives in
//! [`crate::prompts`] so it can be tuned without touching request or
//! normalisation logic here.
//!
//! Models disobey "no code fences" instructions often enough that the raw
//! completion is never trusted: fences are stripped, and anything that still
//! is not an HTML document (empty completion, refusal prose, a bare fragment)
//! is replaced by a deterministic fallback document rather than surfaced as
//! an error. A service failure, by contrast, propagates — there is no retry.

use crate::error::TelePdfError;
use crate::prompts;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Produces a complete print-style HTML document from a free-text description.
#[async_trait]
pub trait MarkupGenerator: Send + Sync {
    /// One outbound request; errors propagate, malformed output does not.
    async fn generate(&self, description: &str) -> Result<String, TelePdfError>;
}

/// [`MarkupGenerator`] backed by the OpenAI chat-completions API.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: model.into(),
        }
    }

    pub fn from_config(config: &crate::config::BotConfig) -> Self {
        Self::new(&config.openai_api_key, &config.model)
    }
}

#[async_trait]
impl MarkupGenerator for OpenAiGenerator {
    async fn generate(&self, description: &str) -> Result<String, TelePdfError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompts::SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompts::user_prompt(description))
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!("Completion returned {} chars", raw.len());

        Ok(ensure_document(&raw))
    }
}

// ── Response normalisation (pure) ────────────────────────────────────────

static RE_CODE_FENCES: Lazy<Regex> = Lazy::new(|| Regex::new(r"```html\n?|```").unwrap());

/// Remove surrounding ```` ```html ```` / ```` ``` ```` markers and trim.
pub fn strip_code_fences(text: &str) -> String {
    RE_CODE_FENCES.replace_all(text, "").trim().to_string()
}

/// Normalise a raw completion into a usable HTML document.
///
/// A completion counts as a document when, after fence stripping, it still
/// contains `<html` (case-insensitive) anywhere. Anything else becomes the
/// [`fallback_document`] wrapping the raw completion text.
pub fn ensure_document(raw: &str) -> String {
    let cleaned = strip_code_fences(raw);
    if !cleaned.is_empty() && cleaned.to_lowercase().contains("<html") {
        cleaned
    } else {
        warn!(
            "Completion was not an HTML document ({} chars); using fallback",
            raw.len()
        );
        fallback_document(raw)
    }
}

/// Minimal valid A4 print document wrapping `raw` as escaped preformatted
/// text. Deterministic: same input, same document.
pub fn fallback_document(raw: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="ar" dir="auto"><head><meta charset="UTF-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"><title>Document</title><style>
@page {{ size: A4; margin: 20mm; }}
body {{ margin: 0; font-family: Arial, 'Segoe UI', sans-serif; line-height: 1.5; color: #111; }}
* {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}
h1, h2, h3 {{ page-break-after: avoid; break-after: avoid-page; margin: 0 0 8px; }}
p, ul, ol, pre, blockquote, figure {{ break-inside: avoid; page-break-inside: avoid; margin: 0 0 10px; }}
table {{ width: 100%; border-collapse: collapse; break-inside: avoid; page-break-inside: avoid; }}
th, td {{ border: 1px solid #ddd; padding: 6px 8px; }}
img {{ max-width: 100%; height: auto; break-inside: avoid; page-break-inside: avoid; }}
section, article {{ break-inside: avoid; page-break-inside: avoid; margin-bottom: 14px; }}
.page-break {{ break-before: page; page-break-before: always; }}
.page-break:last-child {{ display: none; }}
</style></head><body><main><article>
<pre>{}</pre>
</article></main></body></html>"#,
        escape_html(raw)
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
