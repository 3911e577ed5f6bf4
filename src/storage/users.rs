use chrono::Utc;
use redb::ReadableTable;
use thiserror::Error;

use super::db::{Database, DatabaseError};
use super::models::UserRecord;
use super::tables::*;

#[derive(Debug, Error)]
pub enum UserCreateError {
    #[error("User already exists")]
    AlreadyExists,
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl Database {
    // ========================================================================
    // User operations
    // ========================================================================

    /// Register a user. The email must not already be taken; the uniqueness
    /// check and both table inserts happen in one transaction.
    pub fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, UserCreateError> {
        debug_assert!(!email.is_empty(), "email must not be empty");

        let write_txn = self.begin_write()?;
        let user = {
            let mut email_table = write_txn
                .open_table(USER_EMAILS)
                .map_err(DatabaseError::from)?;
            if email_table
                .get(email)
                .map_err(DatabaseError::from)?
                .is_some()
            {
                return Err(UserCreateError::AlreadyExists);
            }

            let user = UserRecord {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            };

            let mut users_table = write_txn.open_table(USERS).map_err(DatabaseError::from)?;
            let data = rmp_serde::to_vec_named(&user).map_err(DatabaseError::from)?;
            users_table
                .insert(user.id.as_str(), data.as_slice())
                .map_err(DatabaseError::from)?;
            email_table
                .insert(email, user.id.as_str())
                .map_err(DatabaseError::from)?;
            user
        };
        write_txn.commit().map_err(DatabaseError::from)?;
        Ok(user)
    }

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS)?;

        match table.get(id)? {
            Some(data) => {
                let user: UserRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Get a user by email (resolves email -> id -> record)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let email_table = read_txn.open_table(USER_EMAILS)?;

        let id = match email_table.get(email)? {
            Some(data) => data.value().to_string(),
            None => return Ok(None),
        };

        let users_table = read_txn.open_table(USERS)?;
        match users_table.get(id.as_str())? {
            Some(data) => {
                let user: UserRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
