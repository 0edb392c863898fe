#![allow(dead_code)]

use git2::{Commit, IndexAddOption, ObjectType, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};

pub const UPSTREAM_DIR: &str = "v2ray-core";
pub const MIRROR_DIR: &str = "v2ray-proto";

pub fn init_repo(path: &Path) -> Repository {
    fs::create_dir_all(path).unwrap();
    let repo = Repository::init(path).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test Author").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

pub fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.update_all(["*"].iter(), None).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit<'_>> = parent.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
    .unwrap();
}

pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel(ObjectType::Commit).unwrap();
    repo.tag_lightweight(name, &head, false).unwrap();
}

/// Upstream with three releases:
/// - v1.0.0: proto/a.proto
/// - v1.1.0: proto/a.proto changed, proto/sub/b.proto added
/// - v1.2.0: proto/a.proto changed, proto/sub/b.proto removed
pub fn upstream_fixture(root: &Path) -> PathBuf {
    let dir = root.join(UPSTREAM_DIR);
    let repo = init_repo(&dir);

    write_file(&dir, "README.md", "upstream");
    write_file(&dir, "proto/a.proto", "a1");
    commit_all(&repo, "release 1.0.0");
    tag_head(&repo, "v1.0.0");

    write_file(&dir, "proto/a.proto", "a2");
    write_file(&dir, "proto/sub/b.proto", "b1");
    write_file(&dir, "proto/sub/b.pb.go", "generated");
    commit_all(&repo, "release 1.1.0");
    tag_head(&repo, "v1.1.0");

    write_file(&dir, "proto/a.proto", "a3");
    fs::remove_file(dir.join("proto/sub/b.proto")).unwrap();
    commit_all(&repo, "release 1.2.0");
    tag_head(&repo, "v1.2.0");

    dir
}

/// Mirror with one untagged commit
pub fn mirror_fixture(root: &Path) -> PathBuf {
    let dir = root.join(MIRROR_DIR);
    let repo = init_repo(&dir);
    write_file(&dir, "README.md", "mirror");
    commit_all(&repo, "initial");
    dir
}

/// Message of the commit a tag points at
pub fn tag_commit_message(repo_dir: &Path, tag: &str) -> String {
    let repo = Repository::open(repo_dir).unwrap();
    let commit = repo
        .revparse_single(&format!("refs/tags/{}", tag))
        .unwrap()
        .peel_to_commit()
        .unwrap();
    commit.message().unwrap_or_default().to_string()
}

/// Contents of `path` in the tree of the commit a tag points at
pub fn file_at_tag(repo_dir: &Path, tag: &str, path: &str) -> Option<String> {
    let repo = Repository::open(repo_dir).unwrap();
    let tree = repo
        .revparse_single(&format!("refs/tags/{}", tag))
        .unwrap()
        .peel_to_tree()
        .unwrap();
    let entry = tree.get_path(Path::new(path)).ok()?;
    let blob = repo.find_blob(entry.id()).ok()?;
    Some(String::from_utf8_lossy(blob.content()).into_owned())
}
