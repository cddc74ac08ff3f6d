//! Error types for the telepdf crate.
//!
//! A single [`TelePdfError`] enum covers the whole pipeline because every
//! failure here is terminal for exactly one chat request: the controller
//! catches it, tells the user, and resets the conversation. There is no
//! partial-success mode to model separately.
//!
//! The split the controller *does* care about is user-visible wording:
//! [`TelePdfError::BrowserNotFound`] gets its own localized reply, everything
//! else collapses into one generic message (the details go to the log, not
//! the chat).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the telepdf library.
#[derive(Debug, Error)]
pub enum TelePdfError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// A required environment variable is absent. Fatal at startup.
    #[error("Missing {name} environment variable.")]
    MissingEnv { name: &'static str },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// No Chrome/Edge/Chromium executable could be located.
    ///
    /// Raised before any browser process is spawned. Surfaced to the user
    /// with a hint to set `BROWSER_PATH`.
    #[error(
        "No local Chrome/Edge browser found.\n\
         Set BROWSER_EXECUTABLE_PATH or BROWSER_PATH to the executable."
    )]
    BrowserNotFound,

    /// The browser process could not be started.
    #[error("Failed to launch browser: {detail}")]
    BrowserLaunch { detail: String },

    /// The browser started but loading the page or printing the PDF failed.
    #[error("PDF rendering failed: {detail}")]
    Render { detail: String },

    // ── Generator errors ──────────────────────────────────────────────────
    /// The chat-completion call failed (network, auth, rate limit, ...).
    ///
    /// Not raised for empty or malformed completions — those are replaced by
    /// the deterministic fallback document instead.
    #[error("Chat completion failed: {0}")]
    Completion(#[from] async_openai::error::OpenAIError),

    // ── Controller errors ─────────────────────────────────────────────────
    /// Could not write the PDF to its temporary file before upload.
    #[error("Failed to write temporary PDF '{path}': {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Telegram API call failed.
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// A blocking render task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_display_names_the_variable() {
        let e = TelePdfError::MissingEnv {
            name: "TELEGRAM_BOT_TOKEN",
        };
        assert!(e.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn browser_not_found_display_mentions_override() {
        let msg = TelePdfError::BrowserNotFound.to_string();
        assert!(msg.contains("BROWSER_PATH"), "got: {msg}");
    }

    #[test]
    fn temp_file_display_includes_path() {
        let e = TelePdfError::TempFile {
            path: PathBuf::from("temp_42_0.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("temp_42_0.pdf"));
    }
}
