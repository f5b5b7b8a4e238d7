use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use tracing::warn;

use crate::error::ListingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One direct child of a listed directory, stat'ed at read time.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// `None` for directories.
    pub size: Option<u64>,
    /// `None` where the platform does not report modification times.
    pub modified: Option<DateTime<Local>>,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Reads and stats every direct child of `dir`.
///
/// All-or-nothing: the first failing `read_dir` step or `stat` aborts the
/// whole read. Entries are stat'ed through symlinks.
pub async fn read_entries(dir: &Path) -> Result<Vec<DirectoryEntry>, ListingError> {
    let read_dir_err = |source| ListingError::ReadDir { path: dir.to_path_buf(), source };

    let mut children = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut entries = Vec::new();
    while let Some(child) = children.next_entry().await.map_err(read_dir_err)? {
        let path = child.path();
        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|source| ListingError::Stat { path: path.clone(), source })?;

        let kind = if meta.is_dir() { EntryKind::Directory } else { EntryKind::File };
        entries.push(DirectoryEntry {
            name: child.file_name().to_string_lossy().into_owned(),
            size: (kind == EntryKind::File).then_some(meta.len()),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            kind,
            path,
        });
    }
    Ok(entries)
}

/// Directories first, then files; names ascending within each group.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    let order = NameOrder::new();
    entries.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| order.compare(&a.name, &b.name))
    });
}

/// Locale-aware name order: root-locale collation, tertiary strength,
/// lowercase before uppercase on ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NameOrder::new().compare(a, b)
}

/// A collator built once per sort.
struct NameOrder {
    collator: Option<Collator>,
}

impl NameOrder {
    fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        options.case_first = Some(CaseFirst::LowerFirst);

        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("root collation unavailable, comparing names by code point: {e}");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        // Collation-equal names (e.g. differently normalized) still need a
        // total order.
        primary.then_with(|| b.cmp(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: EntryKind) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_owned(),
            path: PathBuf::from(name),
            kind,
            size: (kind == EntryKind::File).then_some(0),
            modified: None,
        }
    }

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn directories_sort_before_files() {
        let mut entries = vec![
            entry("b.txt", EntryKind::File),
            entry("a", EntryKind::Directory),
            entry("c", EntryKind::Directory),
            entry("a.txt", EntryKind::File),
        ];
        sort_entries(&mut entries);
        assert_eq!(names(&entries), ["a", "c", "a.txt", "b.txt"]);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let mut entries = vec![
            entry("Zeta.md", EntryKind::File),
            entry("alpha.md", EntryKind::File),
            entry("Beta.md", EntryKind::File),
        ];
        sort_entries(&mut entries);
        assert_eq!(names(&entries), ["alpha.md", "Beta.md", "Zeta.md"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        assert_eq!(compare_names("éclair.txt", "fig.txt"), Ordering::Less);
        assert_eq!(compare_names("Ärger.md", "zebra.md"), Ordering::Less);

        let mut entries = vec![
            entry("zoo.txt", EntryKind::File),
            entry("éclair.txt", EntryKind::File),
            entry("eagle.txt", EntryKind::File),
            entry("fig.txt", EntryKind::File),
        ];
        sort_entries(&mut entries);
        assert_eq!(names(&entries), ["eagle.txt", "éclair.txt", "fig.txt", "zoo.txt"]);
    }

    #[test]
    fn lowercase_wins_ties() {
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("A", "a"), Ordering::Greater);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[tokio::test]
    async fn reads_kinds_and_sizes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("f.bin"), [0u8; 42]).unwrap();

        let mut entries = read_entries(dir.path()).await.unwrap();
        sort_entries(&mut entries);

        assert_eq!(names(&entries), ["sub", "f.bin"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1].size, Some(42));
        assert!(entries[1].modified.is_some());
    }

    #[tokio::test]
    async fn missing_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_entries(&dir.path().join("gone")).await.unwrap_err();
        assert!(matches!(err, ListingError::ReadDir { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlink_is_a_stat_error() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken")).unwrap();
        let err = read_entries(dir.path()).await.unwrap_err();
        assert!(matches!(err, ListingError::Stat { .. }));
    }
}
