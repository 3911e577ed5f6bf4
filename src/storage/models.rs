use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved parent id meaning "top level, no enclosing folder".
pub const ROOT_PARENT: &str = "0";

/// What a catalog record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    File,
    Image,
}

impl FileKind {
    /// Parse the wire representation used by upload requests.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "folder" => Some(FileKind::Folder),
            "file" => Some(FileKind::File),
            "image" => Some(FileKind::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::File => "file",
            FileKind::Image => "image",
        }
    }
}

/// A user record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A file record stored in redb.
///
/// `local_path` is populated for every non-folder record and never for
/// folders; derived thumbnail variants live beside it at `{path}_{width}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: FileKind,
    pub parent_id: String,
    pub is_public: bool,
    #[serde(default)]
    pub local_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a not-yet-committed file record.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub owner_id: String,
    pub name: String,
    pub kind: FileKind,
    pub parent_id: Option<String>,
    pub is_public: bool,
    pub local_path: Option<String>,
}
