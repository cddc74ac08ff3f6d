//! Conversation controller: teloxide dispatcher, handlers, and delivery.
//!
//! Handlers are deliberately dumb: they feed events into
//! [`FlowStore::apply`] and execute the [`Action`] it returns. All
//! conversational rules live in [`crate::state`]; this module only owns the
//! side effects — replies, presence indicators, the temp file, the upload.
//!
//! Pipeline failures never escape a handler as a crash: they are logged with
//! detail and surfaced to the chat as one localized message, and the
//! conversation is already back at `Idle` (the transition reset it before
//! the pipeline ran), so the user can immediately retry.

use crate::error::TelePdfError;
use crate::pipeline::generate::MarkupGenerator;
use crate::pipeline::render::PdfRenderer;
use crate::state::{Action, Event, FlowStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
};
use tracing::{error, info, warn};

/// `callback_data` of the one inline action button.
pub const CREATE_PDF_CALLBACK: &str = "create_pdf";

const BUTTON_LABEL: &str = "إنشاء PDF";
const WELCOME_TEXT: &str =
    "مرحباً! اضغط زر \"إنشاء PDF\" ثم أرسل وصف المحتوى المطلوب تحويله إلى ملف PDF منسق.";
const INSTRUCTIONS_TEXT: &str =
    "أرسل وصف ما تريد، مثلاً: تقرير، سيرة ذاتية، كتيّب، قائمة منتجات، إلخ.";
const SUCCESS_CAPTION: &str = "تم إنشاء ملف PDF بنجاح ✅";
const BROWSER_ERROR_TEXT: &str =
    "تعذر العثور على متصفح Chrome/Edge محلي. عيّن المتغير BROWSER_PATH لمسار التنفيذ.";
const GENERIC_ERROR_TEXT: &str = "حدث خطأ أثناء الإنشاء. حاول مرة أخرى لاحقاً.";
const READY_TEXT: &str = "جاهز لطلب جديد. اضغط \"إنشاء PDF\" للبدء.";

/// The two injected pipeline capabilities.
#[derive(Clone)]
pub struct Services {
    pub generator: Arc<dyn MarkupGenerator>,
    pub renderer: Arc<dyn PdfRenderer>,
}

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn main_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        BUTTON_LABEL,
        CREATE_PDF_CALLBACK,
    )]])
}

/// Run the dispatcher until shutdown (ctrl-c).
pub async fn run(bot: Bot, store: Arc<FlowStore>, services: Services) {
    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(on_callback_query))
        .branch(Update::filter_message().endpoint(on_message));

    info!("telepdf bot is running");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![store, services])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_callback_query(
    bot: Bot,
    query: CallbackQuery,
    store: Arc<FlowStore>,
) -> HandlerResult {
    if query.data.as_deref() != Some(CREATE_PDF_CALLBACK) {
        return Ok(());
    }
    let Some(message) = query.message else {
        return Ok(());
    };
    let chat_id = message.chat.id;

    bot.answer_callback_query(query.id).await?;

    if store.apply(chat_id, Event::CreatePressed).await == Action::PromptForDescription {
        // Swap the button message for the instructions, wizard-style. Old
        // messages can be beyond Telegram's edit window; send fresh instead.
        if let Err(err) = bot
            .edit_message_text(chat_id, message.id, INSTRUCTIONS_TEXT)
            .await
        {
            warn!("edit_message_text failed, sending instead: {err}");
            bot.send_message(chat_id, INSTRUCTIONS_TEXT).await?;
        }
    }
    Ok(())
}

async fn on_message(
    bot: Bot,
    msg: Message,
    store: Arc<FlowStore>,
    services: Services,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    match store.apply(chat_id, Event::Message(text)).await {
        Action::Ignore => {}
        // Button-only reply; a text message never produces it.
        Action::PromptForDescription => {}
        Action::SendWelcome => {
            bot.send_message(chat_id, WELCOME_TEXT)
                .reply_markup(main_keyboard())
                .await?;
        }
        Action::Generate(description) => {
            if let Err(err) = deliver_pdf(&bot, chat_id, &description, &services).await {
                error!("PDF generation for chat {chat_id} failed: {err}");
                let reply = match err {
                    TelePdfError::BrowserNotFound => BROWSER_ERROR_TEXT,
                    _ => GENERIC_ERROR_TEXT,
                };
                bot.send_message(chat_id, reply).await?;
            }
            // State is already Idle; invite the next request either way.
            bot.send_message(chat_id, READY_TEXT)
                .reply_markup(main_keyboard())
                .await?;
        }
    }
    Ok(())
}

/// The generate → render → upload pipeline for one description.
async fn deliver_pdf(
    bot: &Bot,
    chat_id: ChatId,
    description: &str,
    services: &Services,
) -> Result<(), TelePdfError> {
    bot.send_chat_action(chat_id, ChatAction::Typing).await?;
    let markup = services.generator.generate(description).await?;

    bot.send_chat_action(chat_id, ChatAction::UploadDocument)
        .await?;
    let pdf = services.renderer.render(&markup).await?;

    let temp = TempPdf::write(chat_id, &pdf).await?;
    bot.send_document(chat_id, InputFile::file(temp.path().to_path_buf()))
        .caption(SUCCESS_CAPTION)
        .await?;
    info!("Sent {} byte PDF to chat {chat_id}", pdf.len());
    Ok(())
    // `temp` drops here — and on the upload error path — removing the file.
}

/// One rendered PDF on disk for the duration of the upload.
///
/// Removal happens in `Drop`, so the file goes away on success and on every
/// failure after creation alike. Best-effort: an already-missing file is not
/// an error.
struct TempPdf {
    path: PathBuf,
}

impl TempPdf {
    async fn write(chat_id: ChatId, bytes: &[u8]) -> Result<Self, TelePdfError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = std::env::temp_dir().join(format!("temp_{}_{}.pdf", chat_id.0, millis));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| TelePdfError::TempFile {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempPdf {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove {}: {err}", self.path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_pdf_name_carries_chat_id_and_is_removed_on_drop() {
        let temp = TempPdf::write(ChatId(99), b"%PDF-1.7 test")
            .await
            .expect("write should succeed");
        let path = temp.path().to_path_buf();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("temp_99_"), "got: {name}");
        assert!(name.ends_with(".pdf"));
        assert!(path.exists());

        drop(temp);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn temp_pdf_drop_tolerates_missing_file() {
        let temp = TempPdf::write(ChatId(100), b"%PDF-1.7").await.unwrap();
        std::fs::remove_file(temp.path()).unwrap();
        drop(temp); // must not panic
    }
}
