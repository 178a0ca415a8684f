use rusqlite::Row;

use crate::db::ScoreStore;
use crate::error::StoreResult;
use crate::models::{QuizMode, ScoreRecord};

pub const DEFAULT_RANKING_LIMIT: usize = 20;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn percent(score: u32, total: u32) -> f64 {
    if total > 0 {
        f64::from(score) / f64::from(total) * 100.0
    } else {
        0.0
    }
}

fn now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn score_from_row(row: &Row<'_>) -> rusqlite::Result<ScoreRecord> {
    Ok(ScoreRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        mode: row.get(2)?,
        score: row.get(3)?,
        total: row.get(4)?,
        percent: row.get(5)?,
        timestamp: row.get(6)?,
    })
}

impl ScoreStore {
    /// Appends a score for `username`. Does nothing when nobody is logged
    /// in. Returns the id of the new record.
    pub fn record_score(
        &self,
        username: Option<&str>,
        mode: QuizMode,
        score: u32,
        total: u32,
    ) -> StoreResult<Option<i64>> {
        let Some(username) = username else {
            log::debug!("No user logged in, {} score not recorded", mode);
            return Ok(None);
        };

        let percent = percent(score, total);
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO scores (username, mode, score, total, percent, timestamp)
             VALUES (?, ?, ?, ?, ?, ?)",
            rusqlite::params![username, mode, score, total, percent, now()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log::debug!(
            "Recorded score {} for {}: {}/{} ({:.1}%)",
            id,
            username,
            score,
            total,
            percent
        );
        Ok(Some(id))
    }

    /// Best scores, by percent then raw score. Equal entries keep insertion
    /// order, so the earliest record ranks first.
    pub fn top_scores(
        &self,
        mode_filter: Option<QuizMode>,
        limit: usize,
    ) -> StoreResult<Vec<ScoreRecord>> {
        let conn = self.acquire();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let records = match mode_filter {
            Some(mode) => {
                let mut stmt = conn.prepare(
                    "SELECT id, username, mode, score, total, percent, timestamp
                     FROM scores WHERE mode = ?
                     ORDER BY percent DESC, score DESC, id ASC LIMIT ?",
                )?;
                stmt.query_map(rusqlite::params![mode, limit], score_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, username, mode, score, total, percent, timestamp
                     FROM scores
                     ORDER BY percent DESC, score DESC, id ASC LIMIT ?",
                )?;
                stmt.query_map([limit], score_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(records)
    }

    /// A user's own records, newest first.
    pub fn user_history(&self, username: &str, limit: usize) -> StoreResult<Vec<ScoreRecord>> {
        let conn = self.acquire();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(
            "SELECT id, username, mode, score, total, percent, timestamp
             FROM scores WHERE username = ?
             ORDER BY id DESC LIMIT ?",
        )?;
        let records = stmt
            .query_map(rusqlite::params![username, limit], score_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Best percent a user has reached in a mode.
    pub fn personal_best(&self, username: &str, mode: QuizMode) -> StoreResult<Option<f64>> {
        let conn = self.acquire();
        let best: Option<f64> = conn.query_row(
            "SELECT MAX(percent) FROM scores WHERE username = ? AND mode = ?",
            rusqlite::params![username, mode],
            |row| row.get(0),
        )?;
        Ok(best)
    }

    pub fn score_count(&self) -> StoreResult<usize> {
        let conn = self.acquire();
        let count: usize = conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_alice() -> ScoreStore {
        let store = ScoreStore::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();
        store
    }

    #[test]
    fn test_percent_handles_zero_total() {
        assert_eq!(percent(4, 5), 80.0);
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(3, 3), 100.0);
    }

    #[test]
    fn test_end_to_end_register_verify_record_rank() {
        let store = ScoreStore::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();
        assert!(store.verify("alice", "secret").unwrap());
        assert!(!store.verify("alice", "wrong").unwrap());

        store
            .record_score(Some("alice"), QuizMode::Fill, 4, 5)
            .unwrap()
            .unwrap();

        let top = store.top_scores(Some(QuizMode::Fill), DEFAULT_RANKING_LIMIT).unwrap();
        let first = &top[0];
        assert_eq!(first.username, "alice");
        assert_eq!(first.mode, QuizMode::Fill);
        assert_eq!(first.score, 4);
        assert_eq!(first.total, 5);
        assert_eq!(first.percent, 80.0);
        assert_eq!(first.timestamp.len(), "2025-01-01 00:00:00".len());
    }

    #[test]
    fn test_record_without_user_is_noop() {
        let store = store_with_alice();
        let id = store.record_score(None, QuizMode::Choice, 5, 5).unwrap();
        assert!(id.is_none());
        assert_eq!(store.score_count().unwrap(), 0);
    }

    #[test]
    fn test_record_zero_total_stores_zero_percent() {
        let store = store_with_alice();
        store.record_score(Some("alice"), QuizMode::Match, 0, 0).unwrap();
        let top = store.top_scores(None, 10).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].percent, 0.0);
    }

    #[test]
    fn test_mode_filter_includes_and_excludes() {
        let store = store_with_alice();
        store.record_score(Some("alice"), QuizMode::Choice, 3, 5).unwrap();

        assert_eq!(store.top_scores(Some(QuizMode::Choice), 20).unwrap().len(), 1);
        assert!(store.top_scores(Some(QuizMode::Fill), 20).unwrap().is_empty());
        assert!(store.top_scores(Some(QuizMode::Match), 20).unwrap().is_empty());
        assert_eq!(store.top_scores(None, 20).unwrap().len(), 1);
    }

    #[test]
    fn test_ordering_percent_then_score_then_insertion() {
        let store = store_with_alice();
        store.register("bob", "pw").unwrap();

        let first_tie = store.record_score(Some("bob"), QuizMode::Fill, 4, 5).unwrap();
        store.record_score(Some("alice"), QuizMode::Fill, 2, 5).unwrap();
        store.record_score(Some("alice"), QuizMode::Fill, 8, 10).unwrap();
        let second_tie = store.record_score(Some("alice"), QuizMode::Fill, 4, 5).unwrap();
        store.record_score(Some("bob"), QuizMode::Fill, 5, 5).unwrap();

        let top = store.top_scores(None, 20).unwrap();
        let summary: Vec<(u32, u32)> = top.iter().map(|r| (r.score, r.total)).collect();
        assert_eq!(summary, vec![(5, 5), (8, 10), (4, 5), (4, 5), (2, 5)]);

        // equal percent and score: earliest record first
        assert_eq!(Some(top[2].id), first_tie);
        assert_eq!(Some(top[3].id), second_tie);

        for pair in top.windows(2) {
            assert!(
                pair[0].percent > pair[1].percent
                    || (pair[0].percent == pair[1].percent && pair[0].score >= pair[1].score)
            );
        }
    }

    #[test]
    fn test_limit_truncates() {
        let store = store_with_alice();
        for i in 0..25 {
            store.record_score(Some("alice"), QuizMode::Fill, i % 6, 5).unwrap();
        }
        assert_eq!(store.top_scores(None, DEFAULT_RANKING_LIMIT).unwrap().len(), 20);
        assert_eq!(store.top_scores(None, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_user_history_and_personal_best() {
        let store = store_with_alice();
        store.record_score(Some("alice"), QuizMode::Fill, 2, 5).unwrap();
        store.record_score(Some("alice"), QuizMode::Fill, 4, 5).unwrap();
        store.record_score(Some("alice"), QuizMode::Choice, 5, 5).unwrap();
        store.record_score(Some("bob"), QuizMode::Fill, 5, 5).unwrap();

        let history = store.user_history("alice", 10).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].mode, QuizMode::Choice);

        assert_eq!(store.personal_best("alice", QuizMode::Fill).unwrap(), Some(80.0));
        assert_eq!(store.personal_best("alice", QuizMode::Match).unwrap(), None);
    }
}
