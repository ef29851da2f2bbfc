use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;

use crate::{errors::Error, Result};

/// Shape of a Telegram bot token: `<bot id>:<35-char secret>`.
const TOKEN_PATTERN: &str = r"^\d+:[A-Za-z0-9_-]{35}$";

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Path to the JSON word list read at startup (and on /reload-style
    /// administrative actions).
    pub words_file: PathBuf,
    /// Long polling vs webhook delivery. Only polling is implemented; the
    /// flag is validated here so a webhook deployment fails loudly at boot.
    pub use_polling: bool,
    /// How many history entries the /history command shows.
    pub history_display_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }
        if !token_is_valid(&telegram_bot_token) {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN does not look like a bot token".to_string(),
            ));
        }

        let words_file = env_path("WORDS_FILE").unwrap_or_else(|| PathBuf::from("words.json"));
        let use_polling = env_bool("TELEGRAM_POLLING").unwrap_or(true);
        let history_display_limit = env_usize("HISTORY_DISPLAY_LIMIT").unwrap_or(10);

        Ok(Self {
            telegram_bot_token,
            words_file,
            use_polling,
            history_display_limit,
        })
    }
}

pub fn token_is_valid(token: &str) -> bool {
    // Compiled once; the pattern is a compile-time constant and cannot fail.
    static TOKEN_RE: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN_RE
        .get_or_init(|| Regex::new(TOKEN_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(token.trim()))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_pattern_accepts_real_shape() {
        assert!(token_is_valid(
            "123456789:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA_"
        ));
        assert!(token_is_valid(
            "1:abcdefghijklmnopqrstuvwxyz-ABCDEFGH"
        ));
    }

    #[test]
    fn token_pattern_rejects_malformed() {
        assert!(!token_is_valid(""));
        assert!(!token_is_valid("not-a-token"));
        // Secret too short.
        assert!(!token_is_valid("123456789:short"));
        // Missing bot id.
        assert!(!token_is_valid(":AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA_"));
        // Illegal character in the secret.
        assert!(!token_is_valid(
            "123456789:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA$_"
        ));
    }
}
