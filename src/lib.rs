//! # telepdf
//!
//! Telegram bot that turns a free-text content description into a
//! print-ready, single-page A4 PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Telegram update
//!  │
//!  ├─ 1. State    two-state flow per chat (idle / awaiting description)
//!  ├─ 2. Generate chat-completion call → styled HTML document
//!  ├─ 3. Render   headless Chrome prints the document to A4 PDF bytes
//!  └─ 4. Deliver  temp file → document upload → cleanup → back to idle
//! ```
//!
//! The interesting parts are the seams: the state machine is a pure function
//! ([`state::step`]), and the two external services sit behind narrow traits
//! ([`MarkupGenerator`], [`PdfRenderer`]) so everything above them is
//! testable without a network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use telepdf::{BotConfig, ChromePdfRenderer, FlowStore, OpenAiGenerator, Services};
//! use teloxide::Bot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::from_env()?;
//!     let bot = Bot::new(config.telegram_token.clone());
//!     let services = Services {
//!         generator: Arc::new(OpenAiGenerator::from_config(&config)),
//!         renderer: Arc::new(ChromePdfRenderer::new()),
//!     };
//!     telepdf::bot::run(bot, Arc::new(FlowStore::default()), services).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment
//!
//! | Variable | Required | Purpose |
//! |----------|----------|---------|
//! | `TELEGRAM_BOT_TOKEN` | yes | Bot API token |
//! | `OPENAI_API_KEY` | yes | Chat-completions key |
//! | `OPENAI_MODEL` | no | Model override (default `gpt-5-codex`) |
//! | `BROWSER_EXECUTABLE_PATH` | no | Trusted browser path override |
//! | `BROWSER_PATH` | no | Local browser path (existence-checked) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod bot;
pub mod browser;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod state;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use bot::{Services, CREATE_PDF_CALLBACK};
pub use browser::resolve_executable;
pub use config::BotConfig;
pub use error::TelePdfError;
pub use pipeline::generate::{
    ensure_document, fallback_document, strip_code_fences, MarkupGenerator, OpenAiGenerator,
};
pub use pipeline::render::{ChromePdfRenderer, PdfRenderer};
pub use state::{step, Action, ChatFlow, Event, FlowStore};
