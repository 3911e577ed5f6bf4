use chrono::Utc;
use redb::ReadableTable;
use thiserror::Error;

use super::db::{Database, DatabaseError};
use super::models::{FileKind, FileRecord, NewFile, ROOT_PARENT};
use super::tables::*;

#[derive(Debug, Error)]
pub enum FileCreateError {
    #[error("Missing name")]
    EmptyName,
    #[error("Missing data")]
    MissingLocalPath,
    #[error("Parent not found")]
    ParentNotFound,
    #[error("Parent is not a folder")]
    ParentNotFolder,
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Key into the child index: children are scoped to one owner under one parent.
fn children_key(owner_id: &str, parent_id: &str) -> String {
    format!("{owner_id}:{parent_id}")
}

impl Database {
    // ========================================================================
    // File catalog operations
    // ========================================================================

    /// Commit a new catalog record and append it to its parent's child index.
    ///
    /// A non-root parent must already exist and be a folder; non-folder kinds
    /// must arrive with their content path already written by the blob store.
    pub fn create_file(&self, new: NewFile) -> Result<FileRecord, FileCreateError> {
        if new.name.is_empty() {
            return Err(FileCreateError::EmptyName);
        }
        if new.kind != FileKind::Folder && new.local_path.is_none() {
            return Err(FileCreateError::MissingLocalPath);
        }
        debug_assert!(
            new.kind != FileKind::Folder || new.local_path.is_none(),
            "folders never carry a content path"
        );

        let parent_id = new
            .parent_id
            .filter(|p| p != ROOT_PARENT)
            .unwrap_or_else(|| ROOT_PARENT.to_string());

        let write_txn = self.begin_write()?;
        let file = {
            let mut files_table = write_txn.open_table(FILES).map_err(DatabaseError::from)?;

            if parent_id != ROOT_PARENT {
                let parent: FileRecord = match files_table
                    .get(parent_id.as_str())
                    .map_err(DatabaseError::from)?
                {
                    Some(data) => {
                        rmp_serde::from_slice(data.value()).map_err(DatabaseError::from)?
                    }
                    None => return Err(FileCreateError::ParentNotFound),
                };
                if parent.kind != FileKind::Folder {
                    return Err(FileCreateError::ParentNotFolder);
                }
            }

            let file = FileRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: new.owner_id,
                name: new.name,
                kind: new.kind,
                parent_id: parent_id.clone(),
                is_public: new.is_public,
                local_path: new.local_path,
                created_at: Utc::now(),
            };

            let data = rmp_serde::to_vec_named(&file).map_err(DatabaseError::from)?;
            files_table
                .insert(file.id.as_str(), data.as_slice())
                .map_err(DatabaseError::from)?;

            // Maintain the child index (insertion order)
            let mut children_table = write_txn
                .open_table(FOLDER_CHILDREN)
                .map_err(DatabaseError::from)?;
            let key = children_key(&file.user_id, &parent_id);
            let mut child_ids: Vec<String> = children_table
                .get(key.as_str())
                .map_err(DatabaseError::from)?
                .map(|v| rmp_serde::from_slice(v.value()).unwrap_or_default())
                .unwrap_or_default();
            child_ids.push(file.id.clone());
            let index_data = rmp_serde::to_vec_named(&child_ids).map_err(DatabaseError::from)?;
            children_table
                .insert(key.as_str(), index_data.as_slice())
                .map_err(DatabaseError::from)?;

            file
        };
        write_txn.commit().map_err(DatabaseError::from)?;
        Ok(file)
    }

    /// Get a file by id, regardless of owner
    pub fn get_file(&self, id: &str) -> Result<Option<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(FILES)?;

        match table.get(id)? {
            Some(data) => {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Get a file by id, only if it belongs to the given owner
    pub fn get_file_for_owner(
        &self,
        owner_id: &str,
        id: &str,
    ) -> Result<Option<FileRecord>, DatabaseError> {
        Ok(self.get_file(id)?.filter(|f| f.user_id == owner_id))
    }

    /// All of an owner's records under one parent, in insertion order
    pub fn list_children(
        &self,
        owner_id: &str,
        parent_id: &str,
    ) -> Result<Vec<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let children_table = read_txn.open_table(FOLDER_CHILDREN)?;
        let files_table = read_txn.open_table(FILES)?;

        let key = children_key(owner_id, parent_id);
        let child_ids: Vec<String> = match children_table.get(key.as_str())? {
            Some(data) => rmp_serde::from_slice(data.value())?,
            None => return Ok(Vec::new()),
        };

        let mut files = Vec::new();
        for child_id in child_ids {
            if let Some(data) = files_table.get(child_id.as_str())? {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                files.push(file);
            }
        }

        Ok(files)
    }

    /// One fixed-size page of [`Self::list_children`]. Pages are zero-based;
    /// out-of-range pages yield an empty list rather than an error.
    pub fn list_children_page(
        &self,
        owner_id: &str,
        parent_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let children_table = read_txn.open_table(FOLDER_CHILDREN)?;
        let files_table = read_txn.open_table(FILES)?;

        let key = children_key(owner_id, parent_id);
        let child_ids: Vec<String> = match children_table.get(key.as_str())? {
            Some(data) => rmp_serde::from_slice(data.value())?,
            None => return Ok(Vec::new()),
        };

        let mut files = Vec::new();
        for child_id in child_ids.iter().skip(page * page_size).take(page_size) {
            if let Some(data) = files_table.get(child_id.as_str())? {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                files.push(file);
            }
        }

        Ok(files)
    }

    /// Flip a record's visibility. Idempotent; returns the updated record,
    /// or None if the id does not exist.
    pub fn set_visibility(
        &self,
        id: &str,
        is_public: bool,
    ) -> Result<Option<FileRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;

        let updated = {
            let mut table = write_txn.open_table(FILES)?;
            let existing: Option<FileRecord> = match table.get(id)? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };

            match existing {
                Some(mut file) => {
                    file.is_public = is_public;
                    let data = rmp_serde::to_vec_named(&file)?;
                    table.insert(id, data.as_slice())?;
                    Some(file)
                }
                None => None,
            }
        };

        write_txn.commit()?;
        Ok(updated)
    }
}
