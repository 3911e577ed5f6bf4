use redb::TableDefinition;

/// User records: id -> UserRecord (msgpack)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Email index: email -> user id (uniqueness check and login lookup)
pub const USER_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("user_emails");

/// File records: id -> FileRecord (msgpack)
pub const FILES: TableDefinition<&str, &[u8]> = TableDefinition::new("files");

/// Child index: "owner:parent" -> msgpack Vec of file ids, in insertion order
pub const FOLDER_CHILDREN: TableDefinition<&str, &[u8]> = TableDefinition::new("folder_children");
