use std::fmt;

use serde::{Deserialize, Serialize};

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// User ids coming off the wire must be positive.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// A vocabulary entry. All fields are non-empty and trimmed once a `Word`
/// exists; raw entries are validated in `catalog`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub definition: String,
    pub emoji: String,
}

/// Difficulty, both as a user preference and as a per-word tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a user-supplied difficulty argument. Accepts case-insensitive
    /// substring matches ("EASY", "med", "hardcore" all resolve); anything
    /// else is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower.contains("easy") || "easy".contains(lower.as_str()) {
            return Some(Self::Easy);
        }
        if lower.contains("medium") || "medium".contains(lower.as_str()) {
            return Some(Self::Medium);
        }
        if lower.contains("hard") || "hard".contains(lower.as_str()) {
            return Some(Self::Hard);
        }
        None
    }

    /// Tier of a word, from its text and definition lengths.
    pub fn tier_for(word: &Word) -> Self {
        let len = word.text.chars().count();
        let def_len = word.definition.chars().count();
        if len <= 6 && def_len <= 100 {
            Self::Easy
        } else if len <= 10 && def_len <= 150 {
            Self::Medium
        } else {
            Self::Hard
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(s)
    }
}
