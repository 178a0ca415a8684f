use rand::Rng;

use crate::db::ScoreStore;
use crate::db::score::percent;
use crate::error::SessionError;
use crate::generator::{ChoiceQuestion, FillQuestion, MatchBoard, QuizBatch};
use crate::models::{CurrentUser, QuizMode};
use crate::words::WordBank;

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// What the user gave for a fill or choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub given: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { expected: String },
    /// The current question already has its one scored attempt.
    AlreadyAnswered,
    /// The batch is exhausted or the score has been recorded.
    Finished,
    /// Matching games are played with `select_left`/`select_right`.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// One side is selected, waiting for the other.
    Selected,
    Matched { translation: String, english: String },
    Mismatch,
    /// The item was already matched and is out of play.
    Locked,
    Finished,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalScore {
    pub mode: QuizMode,
    pub score: u32,
    pub total: u32,
    pub percent: f64,
    pub record_id: Option<i64>,
}

#[derive(Debug, Default, Clone)]
struct MatchState {
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    locked_left: Vec<bool>,
    locked_right: Vec<bool>,
    matched: usize,
}

impl MatchState {
    fn for_board(board: &MatchBoard) -> Self {
        Self {
            locked_left: vec![false; board.left.len()],
            locked_right: vec![false; board.right.len()],
            ..Self::default()
        }
    }
}

/// One pass through a batch, for any of the three modes.
#[derive(Debug, Clone)]
pub struct QuizSession {
    batch: QuizBatch,
    current_index: usize,
    score: u32,
    responses: Vec<Option<Response>>,
    matching: MatchState,
    finalized: bool,
}

impl QuizSession {
    pub fn new(batch: QuizBatch) -> Self {
        let responses = match &batch {
            QuizBatch::Match(_) => Vec::new(),
            other => vec![None; other.len()],
        };
        let matching = match &batch {
            QuizBatch::Match(board) => MatchState::for_board(board),
            _ => MatchState::default(),
        };
        Self {
            batch,
            current_index: 0,
            score: 0,
            responses,
            matching,
            finalized: false,
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        mode: QuizMode,
        rng: &mut R,
        bank: &WordBank,
        questions: usize,
    ) -> Self {
        Self::new(QuizBatch::generate(mode, rng, bank, questions))
    }

    pub fn mode(&self) -> QuizMode {
        self.batch.mode()
    }

    pub fn batch(&self) -> &QuizBatch {
        &self.batch
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        u32::try_from(self.batch.len()).unwrap_or(u32::MAX)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn is_complete(&self) -> bool {
        match &self.batch {
            QuizBatch::Match(board) => self.matching.matched >= board.pairs.len(),
            other => self.current_index >= other.len(),
        }
    }

    pub fn current_fill(&self) -> Option<&FillQuestion> {
        match &self.batch {
            QuizBatch::Fill(questions) => questions.get(self.current_index),
            _ => None,
        }
    }

    pub fn current_choice(&self) -> Option<&ChoiceQuestion> {
        match &self.batch {
            QuizBatch::Choice(questions) => questions.get(self.current_index),
            _ => None,
        }
    }

    pub fn board(&self) -> Option<&MatchBoard> {
        match &self.batch {
            QuizBatch::Match(board) => Some(board),
            _ => None,
        }
    }

    /// Prompt and expected answer of the current fill or choice question.
    fn current_pair(&self) -> Option<(&str, &str)> {
        match &self.batch {
            QuizBatch::Fill(q) => q
                .get(self.current_index)
                .map(|q| (q.translation.as_str(), q.english.as_str())),
            QuizBatch::Choice(q) => q
                .get(self.current_index)
                .map(|q| (q.translation.as_str(), q.english.as_str())),
            QuizBatch::Match(_) => None,
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.current_pair().map(|(prompt, _)| prompt)
    }

    pub fn current_response(&self) -> Option<&Response> {
        self.responses.get(self.current_index).and_then(Option::as_ref)
    }

    pub fn responses(&self) -> &[Option<Response>] {
        &self.responses
    }

    /// Scores one attempt at the current question. Fill answers compare
    /// trimmed and case-insensitive; choice answers must equal the option.
    pub fn answer(&mut self, input: &str) -> AnswerOutcome {
        if self.finalized || self.is_complete() {
            return AnswerOutcome::Finished;
        }
        let (correct, expected) = match &self.batch {
            QuizBatch::Fill(q) => {
                let expected = &q[self.current_index].english;
                (normalize(input) == normalize(expected), expected.clone())
            }
            QuizBatch::Choice(q) => {
                let expected = &q[self.current_index].english;
                (input == expected, expected.clone())
            }
            QuizBatch::Match(_) => return AnswerOutcome::Unsupported,
        };
        if self.responses[self.current_index].is_some() {
            return AnswerOutcome::AlreadyAnswered;
        }

        self.responses[self.current_index] = Some(Response {
            given: input.to_string(),
            correct,
        });
        if correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect { expected }
        }
    }

    /// Picks option `index` of the current choice question.
    pub fn choose(&mut self, index: usize) -> AnswerOutcome {
        if self.current_response().is_some() {
            return AnswerOutcome::AlreadyAnswered;
        }
        let option = match self.current_choice() {
            Some(q) => match q.options.get(index) {
                Some(option) => option.clone(),
                None => return AnswerOutcome::Unsupported,
            },
            None if self.mode() == QuizMode::Choice => return AnswerOutcome::Finished,
            None => return AnswerOutcome::Unsupported,
        };
        self.answer(&option)
    }

    /// Moves to the next question. A question left unanswered scores zero.
    /// Returns whether the batch is now complete.
    pub fn advance(&mut self) -> bool {
        if !self.finalized && !self.is_complete() && self.board().is_none() {
            self.current_index += 1;
        }
        self.is_complete()
    }

    pub fn selected_left(&self) -> Option<usize> {
        self.matching.selected_left
    }

    pub fn selected_right(&self) -> Option<usize> {
        self.matching.selected_right
    }

    pub fn is_left_locked(&self, index: usize) -> bool {
        self.matching.locked_left.get(index).copied().unwrap_or(false)
    }

    pub fn is_right_locked(&self, index: usize) -> bool {
        self.matching.locked_right.get(index).copied().unwrap_or(false)
    }

    pub fn matched_count(&self) -> usize {
        self.matching.matched
    }

    pub fn select_left(&mut self, index: usize) -> MatchOutcome {
        if self.board().is_none() {
            return MatchOutcome::Unsupported;
        }
        if self.finalized || self.is_complete() {
            return MatchOutcome::Finished;
        }
        match self.matching.locked_left.get(index) {
            None => return MatchOutcome::Unsupported,
            Some(true) => return MatchOutcome::Locked,
            Some(false) => {}
        }
        self.matching.selected_left = Some(index);
        self.check_pair()
    }

    pub fn select_right(&mut self, index: usize) -> MatchOutcome {
        if self.board().is_none() {
            return MatchOutcome::Unsupported;
        }
        if self.finalized || self.is_complete() {
            return MatchOutcome::Finished;
        }
        match self.matching.locked_right.get(index) {
            None => return MatchOutcome::Unsupported,
            Some(true) => return MatchOutcome::Locked,
            Some(false) => {}
        }
        self.matching.selected_right = Some(index);
        self.check_pair()
    }

    fn check_pair(&mut self) -> MatchOutcome {
        let (Some(left), Some(right)) = (self.matching.selected_left, self.matching.selected_right)
        else {
            return MatchOutcome::Selected;
        };
        let QuizBatch::Match(board) = &self.batch else {
            return MatchOutcome::Unsupported;
        };

        let translation = board.left[left].clone();
        let english = board.right[right].clone();
        self.matching.selected_left = None;
        self.matching.selected_right = None;

        if board.is_pair(&translation, &english) {
            self.matching.locked_left[left] = true;
            self.matching.locked_right[right] = true;
            self.matching.matched += 1;
            self.score += 1;
            MatchOutcome::Matched {
                translation,
                english,
            }
        } else {
            MatchOutcome::Mismatch
        }
    }

    /// The english term an explanation should be fetched for: the current
    /// question, or in a matching game the selected right item, falling
    /// back to the term behind the selected left item.
    pub fn current_word(&self) -> Option<String> {
        match &self.batch {
            QuizBatch::Match(board) => {
                if let Some(right) = self.matching.selected_right {
                    return board.right.get(right).cloned();
                }
                self.matching
                    .selected_left
                    .and_then(|left| board.left.get(left))
                    .and_then(|translation| board.english_for(translation))
                    .map(str::to_string)
            }
            _ => self.current_pair().map(|(_, english)| english.to_string()),
        }
    }

    /// Draws a fresh batch of the same mode and size. Not allowed once the
    /// score has been recorded.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R, bank: &WordBank) -> bool {
        if self.finalized {
            return false;
        }
        let size = self.batch.len();
        *self = Self::generate(self.mode(), rng, bank, size);
        true
    }

    /// Records the score exactly once. Fails if the batch is not complete
    /// or the score was already recorded.
    pub fn finalize(
        &mut self,
        store: &ScoreStore,
        user: &CurrentUser,
    ) -> Result<FinalScore, SessionError> {
        if self.finalized {
            return Err(SessionError::AlreadyFinalized);
        }
        if !self.is_complete() {
            return Err(SessionError::NotComplete);
        }

        let mode = self.mode();
        let total = self.total();
        let record_id = store.record_score(user.username(), mode, self.score, total)?;
        self.finalized = true;

        log::info!(
            "{} quiz finished for {}: {}/{}",
            mode,
            user.username().unwrap_or("<anonymous>"),
            self.score,
            total
        );
        Ok(FinalScore {
            mode,
            score: self.score,
            total,
            percent: percent(self.score, total),
            record_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordEntry;

    fn three_pairs() -> MatchBoard {
        MatchBoard {
            pairs: vec![
                WordEntry::new("tent", "帳棚"),
                WordEntry::new("dorm", "宿舍"),
                WordEntry::new("mess", "混亂"),
            ],
            left: vec!["宿舍".into(), "混亂".into(), "帳棚".into()],
            right: vec!["tent".into(), "mess".into(), "dorm".into()],
        }
    }

    fn fill_session() -> QuizSession {
        QuizSession::new(QuizBatch::Fill(vec![
            FillQuestion {
                translation: "帳棚".into(),
                english: "tent".into(),
            },
            FillQuestion {
                translation: "寄宿家庭".into(),
                english: "host family".into(),
            },
        ]))
    }

    fn choice_session() -> QuizSession {
        QuizSession::new(QuizBatch::Choice(vec![ChoiceQuestion {
            translation: "宿舍".into(),
            english: "dorm".into(),
            options: vec!["tent".into(), "dorm".into(), "mess".into(), "pad".into()],
        }]))
    }

    fn alice_store() -> (ScoreStore, CurrentUser) {
        let store = ScoreStore::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();
        let user = store.login("alice", "secret").unwrap();
        (store, user)
    }

    #[test]
    fn test_fill_answer_is_trimmed_and_case_insensitive() {
        let mut session = fill_session();
        assert_eq!(session.prompt(), Some("帳棚"));
        assert_eq!(session.answer("  TeNt "), AnswerOutcome::Correct);
        assert_eq!(session.score(), 1);

        assert!(!session.advance());
        assert_eq!(
            session.answer("host"),
            AnswerOutcome::Incorrect {
                expected: "host family".into()
            }
        );
        assert!(session.advance());
        assert_eq!(session.score(), 1);
        assert_eq!(session.answer("tent"), AnswerOutcome::Finished);
    }

    #[test]
    fn test_one_scored_attempt_per_question() {
        let mut session = fill_session();
        assert!(matches!(session.answer("wrong"), AnswerOutcome::Incorrect { .. }));
        assert_eq!(session.answer("tent"), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_response().unwrap().given, "wrong");
    }

    #[test]
    fn test_choice_scores_selected_option() {
        let mut session = choice_session();
        assert_eq!(session.choose(1), AnswerOutcome::Correct);
        assert_eq!(session.choose(0), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.score(), 1);

        let mut session = choice_session();
        assert_eq!(
            session.choose(0),
            AnswerOutcome::Incorrect {
                expected: "dorm".into()
            }
        );
        assert_eq!(session.choose(9), AnswerOutcome::AlreadyAnswered);
    }

    #[test]
    fn test_out_of_range_option_on_answered_question() {
        let mut session = choice_session();
        assert_eq!(session.choose(7), AnswerOutcome::Unsupported);
        assert_eq!(session.choose(1), AnswerOutcome::Correct);
        assert_eq!(session.choose(7), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.score(), 1);
        assert!(session.responses()[0].as_ref().unwrap().correct);
    }

    #[test]
    fn test_choice_is_exact_match() {
        let mut session = choice_session();
        assert!(matches!(session.answer("DORM"), AnswerOutcome::Incorrect { .. }));
    }

    #[test]
    fn test_skipping_counts_as_wrong() {
        let mut session = fill_session();
        session.advance();
        session.answer("host family");
        assert!(session.advance());
        assert_eq!(session.score(), 1);
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn test_match_three_pairs_finalizes_once() {
        let (store, user) = alice_store();
        let mut session = QuizSession::new(QuizBatch::Match(three_pairs()));

        // correct pair: 宿舍 (left 0) + dorm (right 2)
        assert_eq!(session.select_left(0), MatchOutcome::Selected);
        assert_eq!(
            session.select_right(2),
            MatchOutcome::Matched {
                translation: "宿舍".into(),
                english: "dorm".into()
            }
        );
        assert_eq!(session.matched_count(), 1);
        assert!(session.is_left_locked(0));
        assert!(session.is_right_locked(2));
        assert_eq!(session.select_left(0), MatchOutcome::Locked);

        // wrong pair: 混亂 (left 1) + tent (right 0)
        session.select_left(1);
        assert_eq!(session.select_right(0), MatchOutcome::Mismatch);
        assert_eq!(session.matched_count(), 1);
        assert!(!session.is_left_locked(1));
        assert!(!session.is_right_locked(0));
        assert_eq!(session.selected_left(), None);
        assert_eq!(session.selected_right(), None);

        assert!(matches!(
            session.finalize(&store, &user),
            Err(SessionError::NotComplete)
        ));

        // both items are selectable again
        session.select_right(0);
        assert!(matches!(session.select_left(2), MatchOutcome::Matched { .. }));
        session.select_left(1);
        assert!(matches!(session.select_right(1), MatchOutcome::Matched { .. }));
        assert!(session.is_complete());
        assert_eq!(session.select_left(1), MatchOutcome::Finished);

        let result = session.finalize(&store, &user).unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 3);
        assert_eq!(result.percent, 100.0);
        assert!(result.record_id.is_some());
        assert_eq!(store.score_count().unwrap(), 1);

        assert!(matches!(
            session.finalize(&store, &user),
            Err(SessionError::AlreadyFinalized)
        ));
        assert_eq!(store.score_count().unwrap(), 1);
    }

    #[test]
    fn test_reselecting_a_side_replaces_selection() {
        let mut session = QuizSession::new(QuizBatch::Match(three_pairs()));
        session.select_left(1);
        session.select_left(2);
        assert_eq!(session.selected_left(), Some(2));
        assert!(matches!(session.select_right(0), MatchOutcome::Matched { .. }));
    }

    #[test]
    fn test_current_word_for_explanations() {
        let session = fill_session();
        assert_eq!(session.current_word(), Some("tent".into()));

        let mut session = QuizSession::new(QuizBatch::Match(three_pairs()));
        assert_eq!(session.current_word(), None);
        session.select_left(1);
        assert_eq!(session.current_word(), Some("mess".into()));
        session.select_right(0);
        // mismatch cleared the selection
        assert_eq!(session.current_word(), None);
    }

    #[test]
    fn test_empty_batch_still_records_once() {
        let (store, user) = alice_store();
        let mut session = QuizSession::new(QuizBatch::Fill(vec![]));
        assert!(session.is_complete());
        let result = session.finalize(&store, &user).unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.percent, 0.0);
        assert_eq!(store.score_count().unwrap(), 1);
    }

    #[test]
    fn test_anonymous_finalize_writes_nothing() {
        let store = ScoreStore::open_in_memory().unwrap();
        let mut session = fill_session();
        session.advance();
        session.advance();
        let result = session.finalize(&store, &CurrentUser::anonymous()).unwrap();
        assert!(result.record_id.is_none());
        assert_eq!(store.score_count().unwrap(), 0);
        assert!(session.is_finalized());
    }

    #[test]
    fn test_restart_resets_board() {
        use rand::SeedableRng;
        let bank = WordBank::builtin();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let mut session = QuizSession::generate(QuizMode::Match, &mut rng, &bank, 4);
        let board = session.board().unwrap().clone();
        let english = board.english_for(&board.left[0]).unwrap().to_string();
        let right = board.right.iter().position(|r| *r == english).unwrap();
        session.select_left(0);
        session.select_right(right);
        assert_eq!(session.score(), 1);

        assert!(session.restart(&mut rng, &bank));
        assert_eq!(session.score(), 0);
        assert_eq!(session.matched_count(), 0);
        assert_eq!(session.total(), 4);
        assert_eq!(session.mode(), QuizMode::Match);
    }

    #[test]
    fn test_answers_in_wrong_mode_are_rejected() {
        let mut session = QuizSession::new(QuizBatch::Match(three_pairs()));
        assert_eq!(session.answer("tent"), AnswerOutcome::Unsupported);
        assert_eq!(session.choose(0), AnswerOutcome::Unsupported);

        let mut session = fill_session();
        assert_eq!(session.select_left(0), MatchOutcome::Unsupported);
    }
}
