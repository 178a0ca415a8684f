use std::fmt;

use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    Fill,
    Choice,
    Match,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quiz mode: {0}")]
pub struct UnknownMode(pub String);

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Fill, QuizMode::Choice, QuizMode::Match];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Fill => "fill",
            QuizMode::Choice => "choice",
            QuizMode::Match => "match",
        }
    }

    /// Human readable name used in titles and the ranking table.
    pub fn label(&self) -> &'static str {
        match self {
            QuizMode::Fill => "Fill-in",
            QuizMode::Choice => "Multiple choice",
            QuizMode::Match => "Matching",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for QuizMode {
    type Error = UnknownMode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "fill" => Ok(QuizMode::Fill),
            "choice" => Ok(QuizMode::Choice),
            "match" => Ok(QuizMode::Match),
            _ => Err(UnknownMode(value.to_string())),
        }
    }
}

impl std::str::FromStr for QuizMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizMode::try_from(s)
    }
}

impl ToSql for QuizMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for QuizMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        QuizMode::try_from(string.as_str()).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// One completed quiz, as stored in the `scores` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub id: i64,
    pub username: String,
    pub mode: QuizMode,
    pub score: u32,
    pub total: u32,
    pub percent: f64,
    pub timestamp: String,
}

/// The logged-in user, if any. Passed explicitly to whatever needs to
/// attribute a score or label a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    username: Option<String>,
}

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn login(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn logout(&mut self) {
        self.username = None;
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Login,
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
    Ranking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_through_str() {
        for mode in QuizMode::ALL {
            assert_eq!(QuizMode::try_from(mode.as_str()), Ok(mode));
        }
        assert_eq!(
            QuizMode::try_from("連連看"),
            Err(UnknownMode("連連看".to_string()))
        );
    }

    #[test]
    fn test_current_user_login_logout() {
        let mut user = CurrentUser::anonymous();
        assert!(!user.is_logged_in());
        user.login("alice");
        assert_eq!(user.username(), Some("alice"));
        user.logout();
        assert_eq!(user.username(), None);
    }
}
