use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai::Explainer;
use crate::db::ScoreStore;
use crate::models::{AppState, CurrentUser, QuizMode};
use crate::ranking::{self, ModeFilter, RankingRow};
use crate::session::{AnswerOutcome, FinalScore, MatchOutcome, QuizSession};
use crate::words::WordBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Quiz(QuizMode),
    Ranking,
    Logout,
}

pub const MENU_ITEMS: [MenuItem; 5] = [
    MenuItem::Quiz(QuizMode::Fill),
    MenuItem::Quiz(QuizMode::Choice),
    MenuItem::Quiz(QuizMode::Match),
    MenuItem::Ranking,
    MenuItem::Logout,
];

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Quiz(QuizMode::Fill) => "Fill-in (Chinese -> English)",
            MenuItem::Quiz(QuizMode::Choice) => "Multiple choice (pick one of four)",
            MenuItem::Quiz(QuizMode::Match) => "Matching game",
            MenuItem::Ranking => "Ranking board",
            MenuItem::Logout => "Log out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub correct: bool,
}

/// Per-question input state of the quiz screen.
#[derive(Debug, Clone, Default)]
pub struct QuizInput {
    pub buffer: String,
    /// Cursor position in characters, not bytes.
    pub cursor: usize,
    pub option_cursor: usize,
    pub focus: Column,
    pub left_cursor: usize,
    pub right_cursor: usize,
    pub feedback: Option<Feedback>,
}

impl QuizInput {
    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.buffer.remove(at);
            self.cursor -= 1;
        }
    }

    fn reset_question(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.option_cursor = 0;
        self.feedback = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct App {
    pub state: AppState,
    pub store: ScoreStore,
    pub bank: WordBank,
    pub explainer: Box<dyn Explainer>,
    pub user: CurrentUser,
    pub questions: usize,
    pub ranking_limit: usize,
    pub login: LoginForm,
    pub menu_index: usize,
    pub session: Option<QuizSession>,
    pub input: QuizInput,
    pub result: Option<FinalScore>,
    pub personal_best: Option<f64>,
    pub ranking_filter: ModeFilter,
    pub ranking_rows: Vec<RankingRow>,
    pub popup: Option<Popup>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(
        store: ScoreStore,
        bank: WordBank,
        explainer: Box<dyn Explainer>,
        questions: usize,
        ranking_limit: usize,
    ) -> Self {
        Self::with_rng(
            store,
            bank,
            explainer,
            questions,
            ranking_limit,
            StdRng::from_entropy(),
        )
    }

    pub fn with_rng(
        store: ScoreStore,
        bank: WordBank,
        explainer: Box<dyn Explainer>,
        questions: usize,
        ranking_limit: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            state: AppState::Login,
            store,
            bank,
            explainer,
            user: CurrentUser::anonymous(),
            questions: questions.max(1),
            ranking_limit,
            login: LoginForm::default(),
            menu_index: 0,
            session: None,
            input: QuizInput::default(),
            result: None,
            personal_best: None,
            ranking_filter: ModeFilter::All,
            ranking_rows: Vec::new(),
            popup: None,
            status: None,
            should_quit: false,
            rng,
        }
    }

    /// Title suffix naming the player, as every quiz screen shows it.
    pub fn player_label(&self) -> String {
        format!("Player: {}", self.user.username().unwrap_or("-"))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.popup.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = None;
            }
            return;
        }

        self.status = None;
        match self.state {
            AppState::Login => self.handle_login_key(key),
            AppState::Menu => self.handle_menu_key(key),
            AppState::Quiz => self.handle_quiz_key(key),
            AppState::QuizQuitConfirm => self.handle_quit_confirm_key(key),
            AppState::Summary => self.handle_summary_key(key),
            AppState::Ranking => self.handle_ranking_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::F(2) => self.register(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => self.register(),
            KeyCode::Enter => match self.login.focus {
                LoginField::Username => self.login.focus = LoginField::Password,
                LoginField::Password => self.log_in(),
            },
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
            }
            KeyCode::Char(c) => self.login.focused_mut().push(c),
            _ => {}
        }
    }

    pub fn log_in(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.trim().to_string();
        match self.store.login(&username, &password) {
            Ok(user) => {
                self.user = user;
                self.login = LoginForm::default();
                self.menu_index = 0;
                self.state = AppState::Menu;
                self.status = Some(StatusMessage::info(format!("Welcome back, {}!", username)));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    pub fn register(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.trim().to_string();
        match self.store.register(&username, &password) {
            Ok(()) => {
                self.status = Some(StatusMessage::info("Registration successful, please log in"))
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => {
                if self.menu_index < MENU_ITEMS.len() - 1 {
                    self.menu_index += 1;
                }
            }
            KeyCode::Enter => self.activate(MENU_ITEMS[self.menu_index]),
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                self.menu_index = index;
                self.activate(MENU_ITEMS[index]);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::Quiz(mode) => self.start_quiz(mode),
            MenuItem::Ranking => self.open_ranking(),
            MenuItem::Logout => self.log_out(),
        }
    }

    pub fn log_out(&mut self) {
        log::info!("User {} logged out", self.user.username().unwrap_or("-"));
        self.user.logout();
        self.session = None;
        self.result = None;
        self.state = AppState::Login;
    }

    pub fn start_quiz(&mut self, mode: QuizMode) {
        self.session = Some(QuizSession::generate(
            mode,
            &mut self.rng,
            &self.bank,
            self.questions,
        ));
        self.input = QuizInput::default();
        self.result = None;
        self.personal_best = None;
        self.state = AppState::Quiz;
        // A quiz over an empty word list is complete immediately.
        if self.session.as_ref().is_some_and(QuizSession::is_complete) {
            self.finish_session();
        }
    }

    pub fn open_ranking(&mut self) {
        self.state = AppState::Ranking;
        self.refresh_ranking();
    }

    fn refresh_ranking(&mut self) {
        match ranking::ranking(&self.store, self.ranking_filter, self.ranking_limit) {
            Ok(rows) => self.ranking_rows = rows,
            Err(e) => {
                log::error!("Failed to load ranking: {}", e);
                self.ranking_rows.clear();
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let Some(mode) = self.session.as_ref().map(QuizSession::mode) else {
            self.state = AppState::Menu;
            return;
        };

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::QuizQuitConfirm;
                return;
            }
            KeyCode::F(1) => {
                self.explain_current();
                return;
            }
            KeyCode::Char('e') if ctrl => {
                self.explain_current();
                return;
            }
            // Typed answers may contain '?'.
            KeyCode::Char('?') if mode != QuizMode::Fill => {
                self.explain_current();
                return;
            }
            _ => {}
        }

        match mode {
            QuizMode::Fill => self.handle_fill_key(key),
            QuizMode::Choice => self.handle_choice_key(key),
            QuizMode::Match => self.handle_match_key(key),
        }
    }

    fn current_answered(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.current_response().is_some())
    }

    fn handle_fill_key(&mut self, key: KeyEvent) {
        if self.current_answered() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Down | KeyCode::Tab) {
                self.next_question();
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                if self.input.buffer.trim().is_empty() {
                    return;
                }
                let answer = self.input.buffer.clone();
                self.submit(&answer);
            }
            KeyCode::Down | KeyCode::Tab => self.next_question(),
            KeyCode::Left => self.input.cursor = self.input.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.input.cursor < self.input.buffer.chars().count() {
                    self.input.cursor += 1;
                }
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Char(c) => self.input.insert(c),
            _ => {}
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent) {
        let option_count = self
            .session
            .as_ref()
            .and_then(QuizSession::current_choice)
            .map(|q| q.options.len())
            .unwrap_or(0);

        if self.current_answered() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Tab | KeyCode::Right) {
                self.next_question();
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.input.option_cursor = self.input.option_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.input.option_cursor + 1 < option_count {
                    self.input.option_cursor += 1;
                }
            }
            KeyCode::Enter => self.choose(self.input.option_cursor),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < option_count {
                    self.input.option_cursor = index;
                    self.choose(index);
                }
            }
            KeyCode::Tab | KeyCode::Right => self.next_question(),
            _ => {}
        }
    }

    fn submit(&mut self, answer: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let outcome = session.answer(answer);
        self.show_answer_outcome(outcome);
    }

    fn choose(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let outcome = session.choose(index);
        self.show_answer_outcome(outcome);
    }

    fn show_answer_outcome(&mut self, outcome: AnswerOutcome) {
        self.input.feedback = match outcome {
            AnswerOutcome::Correct => Some(Feedback {
                text: "Correct!".to_string(),
                correct: true,
            }),
            AnswerOutcome::Incorrect { expected } => Some(Feedback {
                text: format!("Wrong, the answer is: {}", expected),
                correct: false,
            }),
            _ => self.input.feedback.take(),
        };
    }

    fn next_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let complete = session.advance();
        self.input.reset_question();
        if complete {
            self.finish_session();
        }
    }

    fn handle_match_key(&mut self, key: KeyEvent) {
        let Some(len) = self
            .session
            .as_ref()
            .and_then(QuizSession::board)
            .map(|b| b.pairs.len())
        else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Left => self.input.focus = Column::Left,
            KeyCode::Right => self.input.focus = Column::Right,
            KeyCode::Tab => {
                self.input.focus = match self.input.focus {
                    Column::Left => Column::Right,
                    Column::Right => Column::Left,
                }
            }
            KeyCode::Up => {
                let cursor = self.focused_cursor();
                *cursor = cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let cursor = self.focused_cursor();
                if *cursor + 1 < len {
                    *cursor += 1;
                }
            }
            KeyCode::Char('r') if ctrl => self.restart_match(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_focused(),
            _ => {}
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.input.focus {
            Column::Left => &mut self.input.left_cursor,
            Column::Right => &mut self.input.right_cursor,
        }
    }

    fn select_focused(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let outcome = match self.input.focus {
            Column::Left => session.select_left(self.input.left_cursor),
            Column::Right => session.select_right(self.input.right_cursor),
        };
        let total = session.total();
        let matched = session.matched_count();

        match outcome {
            MatchOutcome::Matched { .. } => {
                self.input.feedback = Some(Feedback {
                    text: format!("Matched! Progress: {}/{}", matched, total),
                    correct: true,
                });
                if session.is_complete() {
                    self.finish_session();
                }
            }
            MatchOutcome::Mismatch => {
                self.input.feedback = Some(Feedback {
                    text: "Not a pair, try again".to_string(),
                    correct: false,
                });
            }
            MatchOutcome::Selected => {
                self.input.focus = match self.input.focus {
                    Column::Left => Column::Right,
                    Column::Right => Column::Left,
                };
            }
            MatchOutcome::Locked | MatchOutcome::Finished | MatchOutcome::Unsupported => {}
        }
    }

    fn restart_match(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.restart(&mut self.rng, &self.bank) {
            self.input = QuizInput::default();
            self.status = Some(StatusMessage::info("New board dealt"));
        }
    }

    pub fn explain_current(&mut self) {
        let word = self.session.as_ref().and_then(QuizSession::current_word);
        match word {
            Some(word) => {
                let body = self.explainer.explain(&word);
                let source = if self.explainer.is_online() {
                    "AI explanation"
                } else {
                    "offline explanation"
                };
                self.popup = Some(Popup {
                    title: format!("{} - {}", word, source),
                    body,
                });
            }
            None => {
                self.status = Some(StatusMessage::error(
                    "Select a word first, then ask for an explanation",
                ))
            }
        }
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.finalize(&self.store, &self.user) {
            Ok(result) => {
                self.personal_best = self
                    .user
                    .username()
                    .and_then(|name| self.store.personal_best(name, result.mode).ok())
                    .flatten();
                self.result = Some(result);
            }
            Err(e) => {
                log::error!("Failed to record score: {}", e);
                self.status = Some(StatusMessage::error(format!("Score not saved: {}", e)));
            }
        }
        self.state = AppState::Summary;
    }

    fn handle_quit_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                // Abandoned sessions are never recorded.
                self.session = None;
                self.input = QuizInput::default();
                self.state = AppState::Menu;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::Quiz;
            }
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => {
                self.session = None;
                self.state = AppState::Menu;
            }
            KeyCode::Char('r') => {
                if let Some(mode) = self.session.as_ref().map(QuizSession::mode) {
                    self.start_quiz(mode);
                }
            }
            KeyCode::Char('k') => self.open_ranking(),
            _ => {}
        }
    }

    fn handle_ranking_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Tab => {
                self.ranking_filter = self.ranking_filter.next();
                self.refresh_ranking();
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.ranking_filter = self.ranking_filter.prev();
                self.refresh_ranking();
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('m') => {
                self.state = if self.user.is_logged_in() {
                    AppState::Menu
                } else {
                    AppState::Login
                };
            }
            _ => {}
        }
    }
}
