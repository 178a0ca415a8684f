use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ai::explainer_from_config;
use crate::config::AppConfig;
use crate::csv::load_word_bank;
use crate::db::ScoreStore;
use crate::error::ConfigError;
use crate::ranking::{self, ModeFilter, format_table};
use crate::utils::pad_to_width;

#[derive(Parser, Debug)]
#[command(version, about = "Vocabulary quiz in the terminal", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Path to the SQLite database, overriding the config.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Questions per quiz, overriding the config.
    #[arg(long, global = true)]
    pub questions: Option<usize>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Play in the terminal UI (default).
    Play,
    /// Print the ranking board.
    Ranking {
        /// One of all, fill, choice, match.
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        mode: ModeFilter,
        /// Number of rows to show.
        #[arg(long)]
        limit: Option<usize>,
        /// Print the rows as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Explain an english word.
    Explain { word: String },
    /// List the word bank.
    Words,
}

fn parse_filter(value: &str) -> Result<ModeFilter, String> {
    ModeFilter::parse(&value.to_lowercase())
        .ok_or_else(|| format!("unknown mode '{}', expected all, fill, choice or match", value))
}

impl Cli {
    /// Config file values with the command line flags applied on top.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(db) = &self.db {
            config.database = db.clone();
        }
        if let Some(questions) = self.questions {
            config.questions_per_quiz = questions;
        }
        Ok(config)
    }
}

/// Runs one of the non-interactive commands, printing to `out`.
pub fn run_command(
    command: &Command,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Play => {
            return Err("play runs in the terminal UI".into());
        }
        Command::Ranking { mode, limit, json } => {
            let store = ScoreStore::open(&config.database)?;
            let limit = limit.unwrap_or(config.ranking_limit);
            let rows = ranking::ranking(&store, *mode, limit)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                writeln!(out, "Ranking - {}", mode.label())?;
                writeln!(out)?;
                writeln!(out, "{}", format_table(&rows))?;
            }
        }
        Command::Explain { word } => {
            let explainer = explainer_from_config(&config.ai);
            writeln!(out, "{}", explainer.explain(word.trim()))?;
        }
        Command::Words => {
            let bank = load_word_bank(config.word_list.as_deref())?;
            let width = bank
                .all()
                .iter()
                .map(|e| unicode_width::UnicodeWidthStr::width(e.english.as_str()))
                .max()
                .unwrap_or(0);
            for entry in bank.all() {
                writeln!(out, "{}  {}", pad_to_width(&entry.english, width), entry.translation)?;
            }
            writeln!(out)?;
            writeln!(out, "{} words", bank.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizMode;

    fn offline_config(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig {
            database: dir.join("quiz.db"),
            log_file: dir.join("quiz_debug.log"),
            ..AppConfig::default()
        };
        config.ai.enabled = false;
        config
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["vocab-quiz"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.questions, None);
    }

    #[test]
    fn test_parse_ranking_flags() {
        let cli = Cli::try_parse_from([
            "vocab-quiz",
            "--db",
            "/tmp/x.db",
            "ranking",
            "--mode",
            "choice",
            "--limit",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(
            cli.command,
            Some(Command::Ranking {
                mode: ModeFilter::Only(QuizMode::Choice),
                limit: Some(3),
                json: false,
            })
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["vocab-quiz", "ranking", "--mode", "essay"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "questions_per_quiz = 8\n").unwrap();

        let cli = Cli::try_parse_from([
            "vocab-quiz",
            "--config",
            config_path.to_str().unwrap(),
            "--questions",
            "3",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.questions_per_quiz, 3);
    }

    #[test]
    fn test_ranking_command_prints_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = offline_config(temp_dir.path());
        {
            let store = ScoreStore::open(&config.database).unwrap();
            store.record_score(Some("alice"), QuizMode::Fill, 4, 5).unwrap();
            store.record_score(Some("bob"), QuizMode::Match, 5, 5).unwrap();
        }

        let mut out = Vec::new();
        let command = Command::Ranking {
            mode: ModeFilter::Only(QuizMode::Fill),
            limit: None,
            json: false,
        };
        run_command(&command, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("alice"));
        assert!(text.contains("80.0%"));
        assert!(!text.contains("bob"));
    }

    #[test]
    fn test_ranking_command_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = offline_config(temp_dir.path());
        {
            let store = ScoreStore::open(&config.database).unwrap();
            store.record_score(Some("alice"), QuizMode::Choice, 3, 4).unwrap();
        }

        let mut out = Vec::new();
        let command = Command::Ranking {
            mode: ModeFilter::All,
            limit: Some(5),
            json: true,
        };
        run_command(&command, &config, &mut out).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(rows[0]["name"], "alice");
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["percent"], "75.0%");
    }

    #[test]
    fn test_explain_command_offline() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = offline_config(temp_dir.path());
        let mut out = Vec::new();
        run_command(
            &Command::Explain {
                word: "tent".into(),
            },
            &config,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[Offline explanation]"));
        assert!(text.contains("tent"));
    }

    #[test]
    fn test_words_command_uses_csv_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("words.csv");
        std::fs::write(&csv_path, "english,translation\ntent,帳棚\ndorm,宿舍\n").unwrap();
        let mut config = offline_config(temp_dir.path());
        config.word_list = Some(csv_path);

        let mut out = Vec::new();
        run_command(&Command::Words, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tent  帳棚"));
        assert!(text.contains("2 words"));
    }

    #[test]
    fn test_play_is_not_a_print_command() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = offline_config(temp_dir.path());
        let mut out = Vec::new();
        assert!(run_command(&Command::Play, &config, &mut out).is_err());
    }
}
