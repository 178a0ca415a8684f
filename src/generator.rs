//! Question generation for the three quiz modes.
//!
//! Every function takes the random number generator as a parameter so that
//! tests can drive it with a seeded `StdRng`.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::QuizMode;
use crate::words::{WordBank, WordEntry};

/// Number of options shown for a multiple-choice question.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillQuestion {
    pub translation: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceQuestion {
    pub translation: String,
    pub english: String,
    pub options: Vec<String>,
}

/// A matching game: the sampled pairs plus both columns in independent
/// random orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBoard {
    pub pairs: Vec<WordEntry>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl MatchBoard {
    pub fn is_pair(&self, translation: &str, english: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| p.translation == translation && p.english == english)
    }

    /// English term paired with the given translation.
    pub fn english_for(&self, translation: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.translation == translation)
            .map(|p| p.english.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizBatch {
    Fill(Vec<FillQuestion>),
    Choice(Vec<ChoiceQuestion>),
    Match(MatchBoard),
}

impl QuizBatch {
    pub fn generate<R: Rng + ?Sized>(
        mode: QuizMode,
        rng: &mut R,
        bank: &WordBank,
        n: usize,
    ) -> Self {
        match mode {
            QuizMode::Fill => QuizBatch::Fill(fill_batch(rng, bank, n)),
            QuizMode::Choice => QuizBatch::Choice(choice_batch(rng, bank, n)),
            QuizMode::Match => QuizBatch::Match(match_batch(rng, bank, n)),
        }
    }

    pub fn mode(&self) -> QuizMode {
        match self {
            QuizBatch::Fill(_) => QuizMode::Fill,
            QuizBatch::Choice(_) => QuizMode::Choice,
            QuizBatch::Match(_) => QuizMode::Match,
        }
    }

    /// Number of scorable items in the batch.
    pub fn len(&self) -> usize {
        match self {
            QuizBatch::Fill(q) => q.len(),
            QuizBatch::Choice(q) => q.len(),
            QuizBatch::Match(board) => board.pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draws `min(n, bank.len())` distinct entries in random order.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, bank: &WordBank, n: usize) -> Vec<WordEntry> {
    let mut words = bank.all().to_vec();
    words.shuffle(rng);
    words.truncate(n.min(words.len()));
    words
}

pub fn fill_batch<R: Rng + ?Sized>(rng: &mut R, bank: &WordBank, n: usize) -> Vec<FillQuestion> {
    sample(rng, bank, n)
        .into_iter()
        .map(|w| FillQuestion {
            translation: w.translation,
            english: w.english,
        })
        .collect()
}

pub fn choice_batch<R: Rng + ?Sized>(
    rng: &mut R,
    bank: &WordBank,
    n: usize,
) -> Vec<ChoiceQuestion> {
    sample(rng, bank, n)
        .into_iter()
        .map(|w| {
            let options = choice_options(rng, bank, &w.english);
            ChoiceQuestion {
                translation: w.translation,
                english: w.english,
                options,
            }
        })
        .collect()
}

/// The correct term plus up to three distractors, shuffled. A bank with
/// fewer than four terms yields fewer options, never duplicates.
pub fn choice_options<R: Rng + ?Sized>(rng: &mut R, bank: &WordBank, correct: &str) -> Vec<String> {
    let pool: Vec<&str> = bank
        .all()
        .iter()
        .map(|e| e.english.as_str())
        .filter(|e| *e != correct)
        .collect();
    let mut options: Vec<String> = pool
        .choose_multiple(rng, OPTION_COUNT - 1)
        .map(|s| s.to_string())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

/// Pairs on one board have distinct translations, so every left item
/// belongs to exactly one english term.
pub fn match_batch<R: Rng + ?Sized>(rng: &mut R, bank: &WordBank, n: usize) -> MatchBoard {
    let mut seen = HashSet::new();
    let pairs: Vec<WordEntry> = sample(rng, bank, bank.len())
        .into_iter()
        .filter(|p| seen.insert(p.translation.clone()))
        .take(n)
        .collect();
    let mut left: Vec<String> = pairs.iter().map(|p| p.translation.clone()).collect();
    let mut right: Vec<String> = pairs.iter().map(|p| p.english.clone()).collect();
    left.shuffle(rng);
    right.shuffle(rng);
    MatchBoard { pairs, left, right }
}
