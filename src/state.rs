//! Per-conversation flow state: a two-state machine and its store.
//!
//! The machine itself is the pure function [`step`]: `(previous state, event)
//! → (next state, action)`. Handlers never mutate state directly — they feed
//! events through [`FlowStore::apply`] and execute the returned [`Action`].
//! Keeping the transition pure means every conversational rule is unit-tested
//! here without a live Telegram connection.
//!
//! ## Store lifecycle
//!
//! Entries are keyed by chat and carry a last-touched instant. The store
//! lazily evicts chats idle longer than its TTL on each `apply`, so the map
//! cannot grow without bound over the process lifetime. An evicted chat is
//! indistinguishable from a brand-new one: its next message gets the welcome
//! reply again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tracing::trace;

/// The `/start` command resets a conversation from any state.
pub const START_COMMAND: &str = "/start";

/// Chats idle longer than this are dropped from the store.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Where a single conversation is in the create-a-PDF flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChatFlow {
    /// Nothing pending; the next text message is not a description.
    #[default]
    Idle,
    /// The create button was pressed; the next text message is the content
    /// description.
    AwaitingDescription,
}

/// An inbound conversation event.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The "create PDF" inline button was pressed.
    CreatePressed,
    /// A text message arrived (untrimmed).
    Message(&'a str),
}

/// What the controller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reply with the "send me a description" instructions.
    PromptForDescription,
    /// Reply with the welcome message and the create button.
    SendWelcome,
    /// Run the generate → render → send pipeline on this description.
    Generate(String),
    /// No reply, no side effects.
    Ignore,
}

/// Pure transition function for one conversation.
///
/// `prev` is `None` for a chat the store has never seen. Rules, in order:
///
/// - Button press, any state → `AwaitingDescription`, prompt for input.
/// - Blank text → state unchanged (default `Idle` for unknown chats), ignored.
/// - `/start`, or any text from an unknown chat → `Idle`, welcome reply.
///   `/start` wins even while awaiting a description.
/// - Text while `Idle` and known → ignored.
/// - Text while `AwaitingDescription` → `Idle` + [`Action::Generate`]. The
///   reset happens in the transition itself, so the conversation is back to
///   `Idle` no matter how the pipeline ends.
pub fn step(prev: Option<ChatFlow>, event: Event<'_>) -> (ChatFlow, Action) {
    match event {
        Event::CreatePressed => (ChatFlow::AwaitingDescription, Action::PromptForDescription),
        Event::Message(text) => {
            let text = text.trim();
            if text.is_empty() {
                return (prev.unwrap_or_default(), Action::Ignore);
            }
            match prev {
                None => (ChatFlow::Idle, Action::SendWelcome),
                Some(_) if text == START_COMMAND => (ChatFlow::Idle, Action::SendWelcome),
                Some(ChatFlow::Idle) => (ChatFlow::Idle, Action::Ignore),
                Some(ChatFlow::AwaitingDescription) => {
                    (ChatFlow::Idle, Action::Generate(text.to_string()))
                }
            }
        }
    }
}

struct Entry {
    flow: ChatFlow,
    touched: Instant,
}

/// In-memory conversation store with inactivity-based eviction.
pub struct FlowStore {
    ttl: Duration,
    chats: Mutex<HashMap<ChatId, Entry>>,
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl FlowStore {
    /// Create a store evicting chats idle longer than `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            chats: Mutex::new(HashMap::new()),
        }
    }

    /// Feed one event through the state machine and persist the next state.
    ///
    /// Stale chats are pruned first. A blank message from an unknown chat
    /// creates no entry, so the chat still counts as new for its first real
    /// message.
    pub async fn apply(&self, chat: ChatId, event: Event<'_>) -> Action {
        let now = Instant::now();
        let mut chats = self.chats.lock().await;
        chats.retain(|_, entry| now.duration_since(entry.touched) < self.ttl);

        let prev = chats.get(&chat).map(|entry| entry.flow);
        let (next, action) = step(prev, event);
        trace!("chat {chat}: {prev:?} -> {next:?}");

        if prev.is_none() && action == Action::Ignore {
            return Action::Ignore;
        }
        chats.insert(
            chat,
            Entry {
                flow: next,
                touched: now,
            },
        );
        action
    }

    /// Current state of a chat, if the store knows it.
    pub async fn current(&self, chat: ChatId) -> Option<ChatFlow> {
        self.chats.lock().await.get(&chat).map(|entry| entry.flow)
    }
}
