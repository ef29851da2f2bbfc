//! Per-user state: history, streaks, difficulty preference, plus the
//! process-wide word-of-the-day cache.
//!
//! Everything here is in-memory for the process lifetime; there is no
//! persistence across restarts.

use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::{
    domain::{Difficulty, UserId, Word},
    errors::Error,
    Result,
};

/// Most-recent-first history, capped at this many entries per user.
pub const HISTORY_CAP: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub word: String,
    pub definition: String,
    pub emoji: String,
    pub seen_at: DateTime<Utc>,
    pub tier: Difficulty,
}

#[derive(Clone, Debug, Default)]
pub struct UserProfile {
    /// Front = newest. Word fields are copied in at insertion time so a
    /// catalog reload cannot retroactively alter history.
    pub history: Vec<HistoryEntry>,
    pub difficulty: Difficulty,
    pub total_words_seen: u64,
    pub streak_days: u32,
    pub last_interaction: Option<DateTime<Utc>>,
}

/// The word shared by all users for one calendar date.
#[derive(Clone, Debug, Default)]
struct GlobalWordOfDay {
    word: Option<Word>,
    date_key: Option<String>,
}

#[derive(Debug, Default)]
pub struct UserProfileStore {
    profiles: HashMap<UserId, UserProfile>,
    word_of_day: GlobalWordOfDay,
}

impl UserProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily create a profile with defaults; idempotent for a given id.
    pub fn get_or_create(&mut self, user_id: UserId) -> &mut UserProfile {
        self.profiles.entry(user_id).or_default()
    }

    pub fn get(&self, user_id: UserId) -> Option<&UserProfile> {
        self.profiles.get(&user_id)
    }

    /// Record that `word` was shown to `user_id` just now.
    pub fn record_word_seen(&mut self, user_id: UserId, word: &Word) {
        self.record_word_seen_at(user_id, word, Utc::now());
    }

    pub fn record_word_seen_at(&mut self, user_id: UserId, word: &Word, now: DateTime<Utc>) {
        let tier = Difficulty::tier_for(word);
        let profile = self.get_or_create(user_id);

        profile.history.insert(
            0,
            HistoryEntry {
                word: word.text.clone(),
                definition: word.definition.clone(),
                emoji: word.emoji.clone(),
                seen_at: now,
                tier,
            },
        );
        profile.history.truncate(HISTORY_CAP);
        profile.total_words_seen += 1;

        update_streak(profile, now);
        profile.last_interaction = Some(now);
    }

    /// Set the user's difficulty preference. Returns false (and mutates
    /// nothing) when the input is not a recognizable difficulty.
    pub fn set_difficulty(&mut self, user_id: UserId, input: &str) -> bool {
        let Some(difficulty) = Difficulty::parse(input) else {
            return false;
        };
        self.get_or_create(user_id).difficulty = difficulty;
        true
    }

    /// Up to `limit` most recent entries, newest first.
    pub fn history(&self, user_id: UserId, limit: usize) -> &[HistoryEntry] {
        let Some(profile) = self.profiles.get(&user_id) else {
            return &[];
        };
        let end = limit.min(profile.history.len());
        &profile.history[..end]
    }

    /// Administrative clear of one user's profile.
    pub fn clear(&mut self, user_id: UserId) -> bool {
        self.profiles.remove(&user_id).is_some()
    }

    /// The word-of-the-day, fixed per local calendar date and shared by all
    /// users. Picks (and caches) a fresh uniform choice on the first request
    /// of a new date.
    pub fn word_of_day(&mut self, words: &[Word], rng: &mut impl Rng) -> Result<Word> {
        let date_key = Local::now().format("%Y-%m-%d").to_string();
        self.word_of_day_at(words, rng, &date_key)
    }

    pub fn word_of_day_at(
        &mut self,
        words: &[Word],
        rng: &mut impl Rng,
        date_key: &str,
    ) -> Result<Word> {
        if self.word_of_day.date_key.as_deref() == Some(date_key) {
            if let Some(word) = &self.word_of_day.word {
                return Ok(word.clone());
            }
        }

        let word = words.choose(rng).ok_or(Error::EmptyCatalog)?.clone();
        self.word_of_day = GlobalWordOfDay {
            word: Some(word.clone()),
            date_key: Some(date_key.to_string()),
        };
        Ok(word)
    }

    /// Uniform pick with repeats allowed.
    pub fn independent_random(&self, words: &[Word], rng: &mut impl Rng) -> Result<Word> {
        words.choose(rng).cloned().ok_or(Error::EmptyCatalog)
    }

    pub fn user_count(&self) -> usize {
        self.profiles.len()
    }
}

/// Streak rule: first-ever interaction starts at 1; `daysDiff` is the whole
/// number of elapsed 24h periods since the previous interaction. 0 leaves
/// the streak alone, 1 increments, 2+ resets to 1. This measures elapsed
/// wall-clock days, not calendar boundaries.
fn update_streak(profile: &mut UserProfile, now: DateTime<Utc>) {
    let Some(last) = profile.last_interaction else {
        profile.streak_days = 1;
        return;
    };

    let days_diff = (now - last).num_days();
    match days_diff {
        0 => {}
        1 => profile.streak_days += 1,
        _ => profile.streak_days = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn word(text: &str) -> Word {
        Word {
            text: text.to_string(),
            definition: format!("definition of {text}"),
            emoji: "✨".to_string(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn get_or_create_is_idempotent_with_defaults() {
        let mut store = UserProfileStore::new();
        let p = store.get_or_create(UserId(7));
        assert_eq!(p.difficulty, Difficulty::Medium);
        assert_eq!(p.streak_days, 0);
        p.difficulty = Difficulty::Hard;

        assert_eq!(store.get_or_create(UserId(7)).difficulty, Difficulty::Hard);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn history_is_capped_and_newest_first() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        for i in 0..60 {
            store.record_word_seen_at(u, &word(&format!("w{i}")), t0());
        }

        let history = store.history(u, 1000);
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history[0].word, "w59");
        assert_eq!(history[49].word, "w10");
        assert_eq!(store.get(u).unwrap().total_words_seen, 60);
    }

    #[test]
    fn history_limit_truncates() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        for i in 0..5 {
            store.record_word_seen_at(u, &word(&format!("w{i}")), t0());
        }
        assert_eq!(store.history(u, 3).len(), 3);
        assert!(store.history(UserId(99), 3).is_empty());
    }

    #[test]
    fn streak_transitions() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        let w = word("streak");

        // First-ever interaction.
        store.record_word_seen_at(u, &w, t0());
        assert_eq!(store.get(u).unwrap().streak_days, 1);

        // Next day increments.
        store.record_word_seen_at(u, &w, t0() + Duration::days(1));
        assert_eq!(store.get(u).unwrap().streak_days, 2);

        // Gap of 2+ days resets.
        store.record_word_seen_at(u, &w, t0() + Duration::days(4));
        assert_eq!(store.get(u).unwrap().streak_days, 1);
    }

    #[test]
    fn same_day_repeat_leaves_streak_unchanged() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        let w = word("streak");

        store.record_word_seen_at(u, &w, t0());
        store.record_word_seen_at(u, &w, t0() + Duration::hours(3));
        assert_eq!(store.get(u).unwrap().streak_days, 1);
    }

    #[test]
    fn streak_uses_elapsed_days_not_calendar_boundaries() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        let w = word("streak");

        // 23h apart across midnight: elapsed days == 0, no increment.
        let late = Utc.with_ymd_and_hms(2026, 8, 1, 23, 30, 0).unwrap();
        store.record_word_seen_at(u, &w, late);
        store.record_word_seen_at(u, &w, late + Duration::hours(23));
        assert_eq!(store.get(u).unwrap().streak_days, 1);
    }

    #[test]
    fn set_difficulty_rejects_unknown_values() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);

        assert!(!store.set_difficulty(u, "extreme"));
        assert_eq!(store.get_or_create(u).difficulty, Difficulty::Medium);

        assert!(store.set_difficulty(u, "hard"));
        assert_eq!(store.get_or_create(u).difficulty, Difficulty::Hard);
    }

    #[test]
    fn word_of_day_is_stable_within_a_date() {
        let mut store = UserProfileStore::new();
        let words = vec![word("a"), word("b"), word("c"), word("d")];
        let mut rng = rand::rng();

        let first = store.word_of_day_at(&words, &mut rng, "2026-08-01").unwrap();
        let second = store.word_of_day_at(&words, &mut rng, "2026-08-01").unwrap();
        assert_eq!(first, second);

        // A new date may pick a different word; it must at least repopulate
        // the cache for the new key.
        let next = store.word_of_day_at(&words, &mut rng, "2026-08-02").unwrap();
        let again = store.word_of_day_at(&words, &mut rng, "2026-08-02").unwrap();
        assert_eq!(next, again);
    }

    #[test]
    fn word_of_day_fails_on_empty_catalog() {
        let mut store = UserProfileStore::new();
        let mut rng = rand::rng();
        assert!(matches!(
            store.word_of_day_at(&[], &mut rng, "2026-08-01"),
            Err(Error::EmptyCatalog)
        ));
        assert!(matches!(
            store.independent_random(&[], &mut rng),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn history_copies_word_fields_by_value() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        let mut w = word("mutable");
        store.record_word_seen_at(u, &w, t0());
        w.definition = "changed".to_string();

        assert_eq!(store.history(u, 1)[0].definition, "definition of mutable");
    }

    #[test]
    fn clear_removes_profile() {
        let mut store = UserProfileStore::new();
        let u = UserId(1);
        store.record_word_seen_at(u, &word("x"), t0());
        assert!(store.clear(u));
        assert!(!store.clear(u));
        assert!(store.get(u).is_none());
    }
}
