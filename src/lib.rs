pub mod ai;
pub mod app;
pub mod cli;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod generator;
pub mod hash;
pub mod logger;
pub mod models;
pub mod ranking;
pub mod session;
pub mod ui;
pub mod utils;
pub mod words;


// Re-exports for convenience
pub use ai::{Explainer, OfflineExplainer, explainer_from_config, fallback_explanation};
pub use app::App;
pub use config::AppConfig;
pub use db::ScoreStore;
pub use error::{ConfigError, SessionError, StoreError};
pub use generator::{ChoiceQuestion, FillQuestion, MatchBoard, QuizBatch};
pub use models::{AppState, CurrentUser, QuizMode, ScoreRecord};
pub use ranking::{ModeFilter, RankingRow};
pub use session::{AnswerOutcome, FinalScore, MatchOutcome, QuizSession};
pub use words::{WordBank, WordEntry};
