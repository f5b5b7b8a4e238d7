//! Directory listing data, kept apart from its HTML.
//!
//! [`Listing::read`] turns a directory on disk into a [`Listing`]: the
//! breadcrumb trail, the parent link and one [`Row`] per child, already
//! sorted and formatted. [`render`] turns that value into a page. Everything
//! in between is plain data, so ordering, links and sizes are testable
//! without looking at markup.

mod breadcrumb;
mod entry;
mod file_type;
mod render;
mod size;

use std::path::Path;

use crate::error::ListingError;
use crate::path;

pub use breadcrumb::{Breadcrumb, breadcrumbs, parent_href};
pub use entry::{DirectoryEntry, EntryKind, compare_names, read_entries, sort_entries};
pub use file_type::{DIRECTORY_LABEL, FILE_LABEL, extension, icon, type_label};
pub use render::render;
pub use size::format_size;

/// Label of the first breadcrumb and title of the root listing.
pub const ROOT_LABEL: &str = "Root";

/// `YYYY/M/D HH:MM:SS` in local time.
const MODIFIED_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

/// A directory page, ready to render.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Directory name, or [`ROOT_LABEL`] at the root.
    pub title: String,
    /// Decoded request path the listing was built for.
    pub path: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Link to the enclosing directory; `None` at the root.
    pub parent: Option<String>,
    pub rows: Vec<Row>,
}

/// One rendered child entry.
#[derive(Debug, Clone)]
pub struct Row {
    pub name: String,
    pub href: String,
    pub kind: EntryKind,
    pub type_label: &'static str,
    pub icon: &'static str,
    /// Human-readable size; files only.
    pub size: Option<String>,
    pub modified: Option<String>,
}

impl Listing {
    /// Reads `dir` and shapes it for the decoded request path `request_path`.
    pub async fn read(dir: &Path, request_path: &str) -> Result<Self, ListingError> {
        let entries = read_entries(dir).await?;
        Ok(Self::from_entries(request_path, entries))
    }

    /// Shapes already-read entries. Sorts them; does no I/O.
    pub fn from_entries(request_path: &str, mut entries: Vec<DirectoryEntry>) -> Self {
        sort_entries(&mut entries);

        let segments = path::segments(request_path);
        let title = segments.last().copied().unwrap_or(ROOT_LABEL).to_owned();
        let rows = entries.iter().map(|entry| Row::new(&segments, entry)).collect();

        Self {
            title,
            path: request_path.to_owned(),
            breadcrumbs: breadcrumbs(&segments, ROOT_LABEL),
            parent: parent_href(&segments),
            rows,
        }
    }
}

impl Row {
    fn new(dir_segments: &[&str], entry: &DirectoryEntry) -> Self {
        let mut href = path::href(dir_segments.iter().copied().chain([entry.name.as_str()]));
        let (type_label, icon) = match entry.kind {
            EntryKind::Directory => {
                href.push('/');
                (DIRECTORY_LABEL, file_type::FOLDER_ICON)
            }
            EntryKind::File => {
                let ext = extension(&entry.name);
                (type_label(&ext), icon(&ext))
            }
        };
        Self {
            name: entry.name.clone(),
            href,
            kind: entry.kind,
            type_label,
            icon,
            size: entry.size.map(format_size),
            modified: entry.modified.map(|t| t.format(MODIFIED_FORMAT).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{Local, TimeZone};

    use super::*;

    fn file(name: &str, size: u64) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_owned(),
            path: PathBuf::from(name),
            kind: EntryKind::File,
            size: Some(size),
            modified: None,
        }
    }

    fn dir(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_owned(),
            path: PathBuf::from(name),
            kind: EntryKind::Directory,
            size: None,
            modified: None,
        }
    }

    #[test]
    fn root_listing_has_no_parent() {
        let listing = Listing::from_entries("/", vec![file("a.txt", 1)]);
        assert_eq!(listing.title, ROOT_LABEL);
        assert_eq!(listing.parent, None);
        assert_eq!(listing.breadcrumbs.len(), 1);
        assert_eq!(listing.rows[0].href, "/a.txt");
    }

    #[test]
    fn nested_listing_links_relative_to_request_path() {
        let listing = Listing::from_entries("/docs/api", vec![file("x.md", 1536), dir("img")]);
        assert_eq!(listing.title, "api");
        assert_eq!(listing.parent.as_deref(), Some("/docs"));

        let row_links: Vec<_> = listing.rows.iter().map(|r| r.href.as_str()).collect();
        assert_eq!(row_links, ["/docs/api/img/", "/docs/api/x.md"]);
    }

    #[test]
    fn rows_carry_labels_and_sizes() {
        let listing = Listing::from_entries("/", vec![file("x.md", 1536), file("blob", 0), dir("src")]);
        let src = &listing.rows[0];
        assert_eq!((src.type_label, src.size.as_deref()), (DIRECTORY_LABEL, None));

        let blob = &listing.rows[1];
        assert_eq!((blob.type_label, blob.size.as_deref()), (FILE_LABEL, Some("0 B")));

        let md = &listing.rows[2];
        assert_eq!((md.type_label, md.size.as_deref()), ("Markdown", Some("1.5 KB")));
    }

    #[test]
    fn modified_time_is_formatted_locally() {
        let mut entry = file("a.txt", 1);
        entry.modified = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).single();
        let listing = Listing::from_entries("/", vec![entry]);
        assert_eq!(listing.rows[0].modified.as_deref(), Some("2024/3/7 09:05:02"));
    }

    #[test]
    fn names_with_reserved_characters_are_encoded_in_links() {
        let listing = Listing::from_entries("/a b/", vec![file("c#1.txt", 1)]);
        assert_eq!(listing.rows[0].href, "/a%20b/c%231.txt");
        assert_eq!(listing.rows[0].name, "c#1.txt");
    }
}
