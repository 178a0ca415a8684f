use rusqlite::{ErrorCode, OptionalExtension};

use crate::db::ScoreStore;
use crate::error::{StoreError, StoreResult};
use crate::hash::PasswordHash;
use crate::models::CurrentUser;

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl ScoreStore {
    /// Creates a user. Uniqueness is enforced by the primary key; a
    /// violation is reported as [`StoreError::DuplicateUser`].
    pub fn register(&self, username: &str, password: &str) -> StoreResult<()> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StoreError::Validation);
        }

        let password_hash = PasswordHash::of(password);
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        match tx.execute(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)",
            rusqlite::params![username, password_hash.to_hex()],
        ) {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => {
                return Err(StoreError::DuplicateUser(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit()?;

        log::info!("Registered user {}", username);
        Ok(())
    }

    pub fn verify(&self, username: &str, password: &str) -> StoreResult<bool> {
        let password_hash = PasswordHash::of(password);
        let conn = self.acquire();
        let found = conn
            .query_row(
                "SELECT 1 FROM users WHERE username = ? AND password_hash = ?",
                rusqlite::params![username, password_hash.to_hex()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Verifies the credentials and returns the session context for the
    /// user. Unknown users and wrong passwords fail identically.
    pub fn login(&self, username: &str, password: &str) -> StoreResult<CurrentUser> {
        if self.verify(username, password)? {
            log::info!("User {} logged in", username);
            Ok(CurrentUser::logged_in(username))
        } else {
            log::warn!("Failed login attempt for {}", username);
            Err(StoreError::Authentication)
        }
    }

    pub fn user_count(&self) -> StoreResult<usize> {
        let conn = self.acquire();
        let count: usize = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}
