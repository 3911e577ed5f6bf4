use filedepot::storage::models::{FileKind, NewFile, ROOT_PARENT};
use filedepot::storage::{Database, FileCreateError, UserCreateError};

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn new_file(owner: &str, name: &str, kind: FileKind, parent: Option<&str>) -> NewFile {
    NewFile {
        owner_id: owner.to_string(),
        name: name.to_string(),
        kind,
        parent_id: parent.map(|p| p.to_string()),
        is_public: false,
        local_path: match kind {
            FileKind::Folder => None,
            _ => Some(format!("/tmp/blobs/{name}")),
        },
    }
}

// ============================================================================
// User tests
// ============================================================================

#[test]
fn test_create_and_get_user() {
    let (_dir, db) = test_db();

    let user = db.create_user("alice@example.com", "hash").unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.password_hash, "hash");

    let by_id = db.get_user(&user.id).unwrap().expect("user should exist");
    assert_eq!(by_id.email, "alice@example.com");

    let by_email = db
        .get_user_by_email("alice@example.com")
        .unwrap()
        .expect("user should resolve by email");
    assert_eq!(by_email.id, user.id);
}

#[test]
fn test_duplicate_email_rejected() {
    let (_dir, db) = test_db();

    db.create_user("bob@example.com", "hash-1").unwrap();
    let result = db.create_user("bob@example.com", "hash-2");
    assert!(matches!(result, Err(UserCreateError::AlreadyExists)));
}

#[test]
fn test_get_user_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_user("nonexistent").unwrap().is_none());
    assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn test_count_users() {
    let (_dir, db) = test_db();
    assert_eq!(db.count_users().unwrap(), 0);

    db.create_user("a@example.com", "h").unwrap();
    db.create_user("b@example.com", "h").unwrap();
    assert_eq!(db.count_users().unwrap(), 2);
}

// ============================================================================
// File catalog tests
// ============================================================================

#[test]
fn test_create_and_get_file() {
    let (_dir, db) = test_db();

    let file = db
        .create_file(new_file("user-1", "notes.txt", FileKind::File, None))
        .unwrap();
    assert_eq!(file.user_id, "user-1");
    assert_eq!(file.parent_id, ROOT_PARENT);
    assert!(!file.is_public);
    assert!(file.local_path.is_some());

    let retrieved = db.get_file(&file.id).unwrap().expect("file should exist");
    assert_eq!(retrieved.name, "notes.txt");
    assert_eq!(retrieved.kind, FileKind::File);
}

#[test]
fn test_get_file_for_owner_scopes_by_owner() {
    let (_dir, db) = test_db();

    let file = db
        .create_file(new_file("user-1", "private.txt", FileKind::File, None))
        .unwrap();

    assert!(db.get_file_for_owner("user-1", &file.id).unwrap().is_some());
    assert!(db.get_file_for_owner("user-2", &file.id).unwrap().is_none());
}

#[test]
fn test_folder_carries_no_content_path() {
    let (_dir, db) = test_db();

    let folder = db
        .create_file(new_file("user-1", "documents", FileKind::Folder, None))
        .unwrap();
    assert_eq!(folder.kind, FileKind::Folder);
    assert!(folder.local_path.is_none());
}

#[test]
fn test_non_folder_requires_content_path() {
    let (_dir, db) = test_db();

    let mut file = new_file("user-1", "data.bin", FileKind::File, None);
    file.local_path = None;
    let result = db.create_file(file);
    assert!(matches!(result, Err(FileCreateError::MissingLocalPath)));
}

#[test]
fn test_empty_name_rejected() {
    let (_dir, db) = test_db();

    let result = db.create_file(new_file("user-1", "", FileKind::Folder, None));
    assert!(matches!(result, Err(FileCreateError::EmptyName)));
}

#[test]
fn test_create_file_under_folder() {
    let (_dir, db) = test_db();

    let folder = db
        .create_file(new_file("user-1", "images", FileKind::Folder, None))
        .unwrap();
    let file = db
        .create_file(new_file(
            "user-1",
            "photo.png",
            FileKind::Image,
            Some(&folder.id),
        ))
        .unwrap();

    assert_eq!(file.parent_id, folder.id);
}

#[test]
fn test_parent_must_exist() {
    let (_dir, db) = test_db();

    let result = db.create_file(new_file(
        "user-1",
        "orphan.txt",
        FileKind::File,
        Some("no-such-id"),
    ));
    assert!(matches!(result, Err(FileCreateError::ParentNotFound)));
}

#[test]
fn test_parent_must_be_a_folder() {
    let (_dir, db) = test_db();

    let file = db
        .create_file(new_file("user-1", "not-a-folder.txt", FileKind::File, None))
        .unwrap();

    let result = db.create_file(new_file(
        "user-1",
        "child",
        FileKind::Folder,
        Some(&file.id),
    ));
    assert!(matches!(result, Err(FileCreateError::ParentNotFolder)));
}

#[test]
fn test_explicit_root_sentinel_parent() {
    let (_dir, db) = test_db();

    let file = db
        .create_file(new_file("user-1", "top.txt", FileKind::File, Some("0")))
        .unwrap();
    assert_eq!(file.parent_id, ROOT_PARENT);
}

#[test]
fn test_list_children_in_insertion_order() {
    let (_dir, db) = test_db();

    let names = ["first.txt", "second.txt", "third.txt"];
    for name in names {
        db.create_file(new_file("user-1", name, FileKind::File, None))
            .unwrap();
    }

    let children = db.list_children("user-1", ROOT_PARENT).unwrap();
    let listed: Vec<&str> = children.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(listed, names);
}

#[test]
fn test_list_children_scoped_to_owner_and_parent() {
    let (_dir, db) = test_db();

    let folder = db
        .create_file(new_file("user-1", "docs", FileKind::Folder, None))
        .unwrap();
    db.create_file(new_file(
        "user-1",
        "inside.txt",
        FileKind::File,
        Some(&folder.id),
    ))
    .unwrap();
    db.create_file(new_file("user-2", "other.txt", FileKind::File, None))
        .unwrap();

    let in_folder = db.list_children("user-1", &folder.id).unwrap();
    assert_eq!(in_folder.len(), 1);
    assert_eq!(in_folder[0].name, "inside.txt");

    // user-1's root holds only the folder; user-2's root only their file
    let u1_root = db.list_children("user-1", ROOT_PARENT).unwrap();
    assert_eq!(u1_root.len(), 1);
    assert_eq!(u1_root[0].name, "docs");

    let u2_root = db.list_children("user-2", ROOT_PARENT).unwrap();
    assert_eq!(u2_root.len(), 1);
    assert_eq!(u2_root[0].name, "other.txt");
}

#[test]
fn test_list_children_empty_for_unknown_parent() {
    let (_dir, db) = test_db();
    assert!(db.list_children("user-1", "nowhere").unwrap().is_empty());
}

#[test]
fn test_pages_partition_the_full_listing() {
    let (_dir, db) = test_db();
    let page_size = 20;

    for i in 0..25 {
        db.create_file(new_file(
            "user-1",
            &format!("file-{i:02}.txt"),
            FileKind::File,
            None,
        ))
        .unwrap();
    }

    let all = db.list_children("user-1", ROOT_PARENT).unwrap();
    assert_eq!(all.len(), 25);

    let page0 = db
        .list_children_page("user-1", ROOT_PARENT, 0, page_size)
        .unwrap();
    let page1 = db
        .list_children_page("user-1", ROOT_PARENT, 1, page_size)
        .unwrap();
    let page2 = db
        .list_children_page("user-1", ROOT_PARENT, 2, page_size)
        .unwrap();

    assert_eq!(page0.len(), 20);
    assert_eq!(page1.len(), 5);
    assert!(page2.is_empty());

    // Union of pages equals the unpaged listing, in order, no gaps or repeats
    let union: Vec<String> = page0
        .iter()
        .chain(page1.iter())
        .map(|f| f.id.clone())
        .collect();
    let full: Vec<String> = all.iter().map(|f| f.id.clone()).collect();
    assert_eq!(union, full);
}

#[test]
fn test_out_of_range_page_is_empty_not_an_error() {
    let (_dir, db) = test_db();
    db.create_file(new_file("user-1", "only.txt", FileKind::File, None))
        .unwrap();

    let far = db
        .list_children_page("user-1", ROOT_PARENT, 99, 20)
        .unwrap();
    assert!(far.is_empty());
}

#[test]
fn test_set_visibility() {
    let (_dir, db) = test_db();

    let file = db
        .create_file(new_file("user-1", "share-me.txt", FileKind::File, None))
        .unwrap();
    assert!(!file.is_public);

    let published = db.set_visibility(&file.id, true).unwrap().unwrap();
    assert!(published.is_public);

    // Idempotent: publishing again changes nothing
    let again = db.set_visibility(&file.id, true).unwrap().unwrap();
    assert!(again.is_public);

    let unpublished = db.set_visibility(&file.id, false).unwrap().unwrap();
    assert!(!unpublished.is_public);
}

#[test]
fn test_set_visibility_unknown_id() {
    let (_dir, db) = test_db();
    assert!(db.set_visibility("nonexistent", true).unwrap().is_none());
}

#[test]
fn test_count_files_includes_folders() {
    let (_dir, db) = test_db();

    db.create_file(new_file("user-1", "dir", FileKind::Folder, None))
        .unwrap();
    db.create_file(new_file("user-1", "a.txt", FileKind::File, None))
        .unwrap();
    assert_eq!(db.count_files().unwrap(), 2);
}
