//! No-repeat word cycling.
//!
//! The selector owns the active word sequence and the set of word keys
//! already handed out this cycle. Once every word has been seen the used
//! set is cleared and a fresh cycle begins.

use std::collections::HashSet;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::info;

use crate::domain::Word;

#[derive(Clone, Debug, Default)]
pub struct CycleSelector {
    words: Vec<Word>,
    used: HashSet<String>,
}

/// Read-only view of how far through the current cycle we are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleProgress {
    pub total: usize,
    pub used: usize,
    pub remaining: usize,
    pub percent_used: u32,
}

impl CycleSelector {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            used: HashSet::new(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Pick the next word of the cycle, uniformly among those not yet used.
    ///
    /// Returns `None` only when the word sequence is empty. Exhaustion is
    /// detected by the unused remainder going empty (not by comparing set
    /// sizes, which undercounts when several entries share a text key); the
    /// used set is then cleared, so a non-empty sequence always yields a
    /// word.
    pub fn select_next(&mut self, rng: &mut impl Rng) -> Option<Word> {
        if self.words.is_empty() {
            return None;
        }

        let mut available: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| !self.used.contains(&w.text))
            .collect();

        if available.is_empty() {
            info!(total = self.words.len(), "word cycle exhausted; resetting");
            self.used.clear();
            available = self.words.iter().collect();
        }

        let chosen = (*available.choose(rng)?).clone();
        self.used.insert(chosen.text.clone());
        Some(chosen)
    }

    /// Uniform pick over the full sequence, ignoring (and not updating) the
    /// cycle state. Used for shuffle/share style requests that allow repeats.
    pub fn select_independent(&self, rng: &mut impl Rng) -> Option<Word> {
        self.words.choose(rng).cloned()
    }

    /// Manual cycle reset (e.g. after a reload).
    pub fn reset_cycle(&mut self) {
        self.used.clear();
    }

    /// Swap in a freshly loaded word sequence. The used set is cleared so
    /// stale keys cannot reference now-absent words.
    pub fn replace_words(&mut self, words: Vec<Word>) {
        self.words = words;
        self.used.clear();
    }

    pub fn progress(&self) -> CycleProgress {
        let total = self.words.len();
        let used = self.used.len();
        let percent_used = if total == 0 {
            0
        } else {
            (100.0 * used as f64 / total as f64).round() as u32
        };

        CycleProgress {
            total,
            used,
            remaining: total - used,
            percent_used,
        }
    }
}
