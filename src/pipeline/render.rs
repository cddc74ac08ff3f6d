//! PDF rendering: print an HTML document to a one-page A4 PDF via Chrome.
//!
//! ## Why spawn_blocking?
//!
//! `headless_chrome` drives the browser over a synchronous websocket — its
//! calls block the thread. `tokio::task::spawn_blocking` moves the whole
//! launch/navigate/print sequence onto the blocking pool so bot handlers keep
//! making progress while Chrome works.
//!
//! ## Process lifetime
//!
//! The Chrome process is owned by the [`Browser`] handle and killed when the
//! handle drops. Every exit path below — launch failure, navigation failure,
//! print failure, success — runs that drop, so no orphaned Chrome survives a
//! request.

use crate::browser;
use crate::error::TelePdfError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use headless_chrome::protocol::cdp::Emulation;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

// A4 in inches, what Chrome's printToPDF expects.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.7;

/// Prints a complete HTML document to PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, markup: &str) -> Result<Vec<u8>, TelePdfError>;
}

/// [`PdfRenderer`] backed by a locally installed Chrome/Edge/Chromium.
pub struct ChromePdfRenderer {
    locate: fn() -> Option<PathBuf>,
}

impl ChromePdfRenderer {
    pub fn new() -> Self {
        Self {
            locate: browser::resolve_executable,
        }
    }

    #[cfg(test)]
    fn with_locator(locate: fn() -> Option<PathBuf>) -> Self {
        Self { locate }
    }
}

impl Default for ChromePdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    /// Resolve the executable first: with no browser installed this fails
    /// with [`TelePdfError::BrowserNotFound`] before any process is spawned.
    async fn render(&self, markup: &str) -> Result<Vec<u8>, TelePdfError> {
        let executable = (self.locate)().ok_or(TelePdfError::BrowserNotFound)?;
        let markup = markup.to_string();

        tokio::task::spawn_blocking(move || render_blocking(&executable, &markup))
            .await
            .map_err(|e| TelePdfError::Internal(format!("Render task panicked: {e}")))?
    }
}

/// Blocking implementation of the launch → load → print sequence.
fn render_blocking(executable: &Path, markup: &str) -> Result<Vec<u8>, TelePdfError> {
    debug!("Launching browser: {}", executable.display());
    // Sandboxing is off so the bot runs on restricted hosts (containers
    // without user namespaces).
    let options = LaunchOptions::default_builder()
        .headless(true)
        .path(Some(executable.to_path_buf()))
        .sandbox(false)
        .args(vec![OsStr::new("--disable-setuid-sandbox")])
        .build()
        .map_err(|e| TelePdfError::BrowserLaunch {
            detail: e.to_string(),
        })?;

    let chrome = Browser::new(options).map_err(|e| TelePdfError::BrowserLaunch {
        detail: e.to_string(),
    })?;

    let tab = chrome.new_tab().map_err(render_err)?;

    // Chrome loads the document from a data: URL; base64 keeps the Arabic
    // text and embedded CSS out of URL-escaping trouble.
    let url = format!("data:text/html;base64,{}", STANDARD.encode(markup));
    tab.navigate_to(&url).map_err(render_err)?;
    tab.wait_until_navigated().map_err(render_err)?;

    // Print-media emulation so the document's @media print / @page rules apply.
    tab.call_method(Emulation::SetEmulatedMedia {
        media: Some("print".to_string()),
        features: None,
    })
    .map_err(render_err)?;

    let pdf = tab
        .print_to_pdf(Some(PrintToPdfOptions {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            // Only the first page, even if the document overflows A4.
            page_ranges: Some("1".to_string()),
            ..Default::default()
        }))
        .map_err(render_err)?;

    debug!("Rendered PDF: {} bytes", pdf.len());
    Ok(pdf)
}

fn render_err<E: std::fmt::Display>(e: E) -> TelePdfError {
    TelePdfError::Render {
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_browser_fails_before_launch() {
        let renderer = ChromePdfRenderer::with_locator(|| None);
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(matches!(err, TelePdfError::BrowserNotFound));
    }

    #[tokio::test]
    async fn bogus_executable_is_a_launch_error_not_a_panic() {
        let renderer = ChromePdfRenderer::with_locator(|| {
            Some(PathBuf::from("/definitely/not/real/chrome"))
        });
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(
            matches!(err, TelePdfError::BrowserLaunch { .. } | TelePdfError::Render { .. }),
            "got: {err}"
        );
    }
}
