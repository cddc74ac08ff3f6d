//! Process configuration, read from the environment.
//!
//! Only the credentials the process cannot run without live here. The browser
//! override variables (`BROWSER_EXECUTABLE_PATH`, `BROWSER_PATH`) are
//! deliberately *not* part of [`BotConfig`]: the locator reads them at render
//! time, so a browser installed after startup is picked up without a restart
//! and a missing browser only fails the one request that needed it.

use crate::error::TelePdfError;

/// Default chat-completion model when `OPENAI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-5-codex";

/// Startup configuration for the bot process.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram Bot API token (`TELEGRAM_BOT_TOKEN`, required).
    pub telegram_token: String,
    /// OpenAI API key (`OPENAI_API_KEY`, required).
    pub openai_api_key: String,
    /// Chat-completion model (`OPENAI_MODEL`, default [`DEFAULT_MODEL`]).
    pub model: String,
}

impl std::fmt::Debug for BotConfig {
    // Credentials stay out of Debug output so `?config` is log-safe.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl BotConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`TelePdfError::MissingEnv`] naming the first absent required
    /// variable. Empty values count as absent.
    pub fn from_env() -> Result<Self, TelePdfError> {
        Ok(Self {
            telegram_token: required("TELEGRAM_BOT_TOKEN")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            model: std::env::var("OPENAI_MODEL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, TelePdfError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(TelePdfError::MissingEnv { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-var tests mutate process-global state; serialise them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap();
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();
        for (k, v) in vars {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
        f();
        for (k, v) in saved {
            match v {
                Some(v) => std::env::set_var(&k, v),
                None => std::env::remove_var(&k),
            }
        }
    }

    #[test]
    fn missing_token_is_fatal() {
        with_env(
            &[
                ("TELEGRAM_BOT_TOKEN", None),
                ("OPENAI_API_KEY", Some("sk-test")),
            ],
            || {
                let err = BotConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
            },
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        with_env(
            &[
                ("TELEGRAM_BOT_TOKEN", Some("123:abc")),
                ("OPENAI_API_KEY", Some("")),
            ],
            || {
                let err = BotConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("OPENAI_API_KEY"));
            },
        );
    }

    #[test]
    fn model_defaults_when_unset() {
        with_env(
            &[
                ("TELEGRAM_BOT_TOKEN", Some("123:abc")),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_MODEL", None),
            ],
            || {
                let config = BotConfig::from_env().unwrap();
                assert_eq!(config.model, DEFAULT_MODEL);
            },
        );
    }

    #[test]
    fn model_override_wins() {
        with_env(
            &[
                ("TELEGRAM_BOT_TOKEN", Some("123:abc")),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_MODEL", Some("gpt-4.1-mini")),
            ],
            || {
                let config = BotConfig::from_env().unwrap();
                assert_eq!(config.model, "gpt-4.1-mini");
            },
        );
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = BotConfig {
            telegram_token: "123:secret".into(),
            openai_api_key: "sk-secret".into(),
            model: DEFAULT_MODEL.into(),
        };
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains(DEFAULT_MODEL));
    }
}
