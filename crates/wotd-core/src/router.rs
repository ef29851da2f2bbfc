//! Command parsing and dispatch.
//!
//! The command set is a closed enum with exact, case-sensitive token
//! matching; anything unrecognized routes to the catch-all reply. Handler
//! outcomes are `Result<String>`, and this module's dispatch boundary is
//! the only place handler errors are caught and turned into a generic
//! user-facing failure reply. Nothing here ever reaches the transport as
//! an error.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::error;

use crate::{
    domain::{Difficulty, UserId, Word},
    errors::Error,
    profile::UserProfileStore,
    selector::CycleSelector,
    stats::{BotStats, RequestStats},
    Result,
};

/// Supported chat commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Word,
    Stats,
    Help,
    WordOfTheDay,
    History,
    Random,
    Difficulty,
    Share,
    Unknown,
}

impl BotCommand {
    /// Parse the leading token of a message. Matching is exact and
    /// case-sensitive; only a `@botname` suffix is stripped (Telegram sends
    /// `/cmd@botname` in groups).
    pub fn parse(text: &str) -> (Self, String) {
        let mut parts = text.trim().splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or("").trim();
        let args = parts.next().unwrap_or("").trim().to_string();

        let Some(token) = first.strip_prefix('/') else {
            return (Self::Unknown, args);
        };
        let token = token.split('@').next().unwrap_or("");

        let cmd = match token {
            "start" => Self::Start,
            "word" => Self::Word,
            "stats" => Self::Stats,
            "help" => Self::Help,
            "wordoftheday" => Self::WordOfTheDay,
            "history" => Self::History,
            "random" => Self::Random,
            "difficulty" => Self::Difficulty,
            "share" => Self::Share,
            _ => Self::Unknown,
        };
        (cmd, args)
    }
}

/// All mutable bot state, explicitly owned and passed to handlers. No
/// process-wide singletons.
#[derive(Debug)]
pub struct BotState {
    pub selector: CycleSelector,
    pub profiles: UserProfileStore,
    pub requests: RequestStats,
    pub started_at: DateTime<Utc>,
    pub history_display_limit: usize,
}

impl BotState {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            selector: CycleSelector::new(words),
            profiles: UserProfileStore::new(),
            requests: RequestStats::default(),
            started_at: Utc::now(),
            history_display_limit: 10,
        }
    }
}

/// Route one inbound message and produce the reply text to send.
///
/// Returns `None` when the request is skipped entirely (invalid user id).
/// Handler errors are caught here and become a generic failure reply.
pub fn dispatch(state: &mut BotState, user_id: UserId, text: &str) -> Option<String> {
    dispatch_at(state, user_id, text, Utc::now(), &mut rand::rng())
}

pub fn dispatch_at(
    state: &mut BotState,
    user_id: UserId,
    text: &str,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Option<String> {
    if !user_id.is_valid() {
        error!(user_id = user_id.0, "dropping message with invalid user id");
        return None;
    }

    state.requests.record(user_id);
    let (cmd, args) = BotCommand::parse(text);

    let reply = match handle(state, user_id, cmd, &args, now, rng) {
        Ok(reply) => reply,
        Err(e) => {
            error!("command handler failed: {e}");
            "😵 Something went wrong handling that. Please try again.".to_string()
        }
    };
    Some(reply)
}

fn handle(
    state: &mut BotState,
    user_id: UserId,
    cmd: BotCommand,
    args: &str,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<String> {
    match cmd {
        BotCommand::Start => Ok(welcome_text()),
        BotCommand::Help => Ok(help_text()),
        BotCommand::Word => Ok(next_word(state, user_id, now, rng)),
        BotCommand::Stats => Ok(stats_text(state, now)),
        BotCommand::WordOfTheDay => word_of_day(state, user_id, now, rng),
        BotCommand::History => Ok(history_text(state, user_id)),
        BotCommand::Random => random_word(state, user_id, now, rng),
        BotCommand::Share => share_word(state, user_id, now, rng),
        BotCommand::Difficulty => Ok(difficulty_text(state, user_id, args)),
        BotCommand::Unknown => Ok("🤔 I don't know that command. Try /help.".to_string()),
    }
}

fn welcome_text() -> String {
    "👋 *Welcome to the Word of the Day bot!*\n\n\
I'll help you grow your vocabulary, one word at a time.\n\
Send /word to get started, or /help to see everything I can do."
        .to_string()
}

fn help_text() -> String {
    "📚 *Commands:*\n\
/start - Welcome message\n\
/word - Your next word (no repeats until the whole set is used)\n\
/wordoftheday - Today's shared word\n\
/random - A random word (repeats allowed)\n\
/share - A word formatted for sharing\n\
/history - Your recently seen words\n\
/difficulty [easy|medium|hard] - Show or set your difficulty\n\
/stats - Bot statistics\n\
/help - This message"
        .to_string()
}

fn next_word(state: &mut BotState, user_id: UserId, now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let Some(word) = state.selector.select_next(rng) else {
        return "📭 No words available right now. Please try again later.".to_string();
    };

    state.profiles.record_word_seen_at(user_id, &word, now);
    let progress = state.selector.progress();
    let profile = state.profiles.get_or_create(user_id);

    format!(
        "{} *{}*\n\n{}\n\nDifficulty: {}\nCycle: {}/{} words ({}%)\n🔥 Streak: {} day(s)",
        word.emoji,
        word.text,
        word.definition,
        Difficulty::tier_for(&word),
        progress.used,
        progress.total,
        progress.percent_used,
        profile.streak_days,
    )
}

fn word_of_day(
    state: &mut BotState,
    user_id: UserId,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<String> {
    let words = state.selector.words().to_vec();
    let word = match state.profiles.word_of_day(&words, rng) {
        Ok(word) => word,
        Err(Error::EmptyCatalog) => {
            return Ok("📭 No words available right now. Please try again later.".to_string())
        }
        Err(e) => return Err(e),
    };

    state.profiles.record_word_seen_at(user_id, &word, now);
    Ok(format!(
        "🌅 *Word of the Day*\n\n{} *{}*\n\n{}",
        word.emoji, word.text, word.definition
    ))
}

fn random_word(
    state: &mut BotState,
    user_id: UserId,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<String> {
    let word = match state.profiles.independent_random(state.selector.words(), rng) {
        Ok(word) => word,
        Err(Error::EmptyCatalog) => {
            return Ok("📭 No words available right now. Please try again later.".to_string())
        }
        Err(e) => return Err(e),
    };

    state.profiles.record_word_seen_at(user_id, &word, now);
    Ok(format!(
        "🎲 {} *{}*\n\n{}",
        word.emoji, word.text, word.definition
    ))
}

fn share_word(
    state: &mut BotState,
    user_id: UserId,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<String> {
    let word = match state.profiles.independent_random(state.selector.words(), rng) {
        Ok(word) => word,
        Err(Error::EmptyCatalog) => {
            return Ok("📭 No words available right now. Please try again later.".to_string())
        }
        Err(e) => return Err(e),
    };

    state.profiles.record_word_seen_at(user_id, &word, now);
    Ok(format!(
        "📤 Today I learned a word:\n\n{} *{}* — {}\n\nShared from the Word of the Day bot 📖",
        word.emoji, word.text, word.definition
    ))
}

fn history_text(state: &BotState, user_id: UserId) -> String {
    let entries = state.profiles.history(user_id, state.history_display_limit);
    if entries.is_empty() {
        return "🗒 No history yet. Send /word to see your first word!".to_string();
    }

    let mut out = String::from("🗒 *Your recent words:*\n");
    for entry in entries {
        out.push_str(&format!(
            "\n{} *{}* ({})",
            entry.emoji, entry.word, entry.tier
        ));
    }
    out
}

fn difficulty_text(state: &mut BotState, user_id: UserId, args: &str) -> String {
    if args.trim().is_empty() {
        let current = state.profiles.get_or_create(user_id).difficulty;
        return format!(
            "🎚 Your difficulty is *{current}*.\nUse /difficulty easy|medium|hard to change it."
        );
    }

    if state.profiles.set_difficulty(user_id, args) {
        let current = state.profiles.get_or_create(user_id).difficulty;
        format!("✅ Difficulty set to *{current}*.")
    } else {
        "❌ Invalid difficulty. Use easy, medium or hard.".to_string()
    }
}

fn stats_text(state: &BotState, now: DateTime<Utc>) -> String {
    let stats = BotStats::collect(
        state.selector.progress(),
        &state.requests,
        state.started_at,
        now,
    );

    format!(
        "📊 *Bot Stats*\n\n\
Words: {} total, {} used, {} remaining\n\
Cycle progress: {}%\n\
Requests: {} from {} user(s)\n\
Uptime: {}",
        stats.total_words,
        stats.used_words,
        stats.remaining_words,
        stats.cycle_progress_percent,
        stats.total_requests,
        stats.unique_users,
        stats.uptime,
    )
}
