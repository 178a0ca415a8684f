use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ModelConfig};
use crate::db::{get_data_dir, get_db_path};
use crate::db::score::DEFAULT_RANKING_LIMIT;
use crate::error::ConfigError;

pub const DEFAULT_QUESTIONS: usize = 5;
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: PathBuf,
    pub questions_per_quiz: usize,
    /// CSV file of `english,translation` lines replacing the built-in list.
    pub word_list: Option<PathBuf>,
    pub ranking_limit: usize,
    pub log_file: PathBuf,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: get_db_path(),
            questions_per_quiz: DEFAULT_QUESTIONS,
            word_list: None,
            ranking_limit: DEFAULT_RANKING_LIMIT,
            log_file: get_data_dir().join("quiz_debug.log"),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        get_data_dir().join("config.toml")
    }

    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Reads `path` if given (it must exist), otherwise the default config
    /// file if there is one, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents, &path)
    }

    /// Questions per quiz, never less than one.
    pub fn questions(&self) -> usize {
        self.questions_per_quiz.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.questions(), DEFAULT_QUESTIONS);
        assert!(config.ai.enabled);
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let toml = r#"
            questions_per_quiz = 10
            word_list = "units.csv"

            [ai]
            enabled = false
            timeout_secs = 3
        "#;
        let config = AppConfig::from_toml_str(toml, Path::new("config.toml")).unwrap();
        assert_eq!(config.questions(), 10);
        assert_eq!(config.word_list, Some(PathBuf::from("units.csv")));
        assert!(!config.ai.enabled);
        assert_eq!(config.ai.timeout(), Duration::from_secs(3));
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert_eq!(config.ranking_limit, DEFAULT_RANKING_LIMIT);
    }

    #[test]
    fn test_zero_questions_is_clamped() {
        let config =
            AppConfig::from_toml_str("questions_per_quiz = 0", Path::new("config.toml")).unwrap();
        assert_eq!(config.questions(), 1);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let err = AppConfig::from_toml_str("questions_per_quiz = \"many\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "ranking_limit = 5\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.ranking_limit, 5);

        let missing = temp_dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }
}
