//! Mapping request paths onto the serving root.
//!
//! Request paths are percent-decoded exactly once, then joined onto the root
//! lexically: `..` pops a component, `.` and empty segments vanish. The
//! result must stay inside the root; anything else is a traversal attempt.

use std::path::{Component, Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::Error;

/// Bytes escaped when a file name is placed back into a URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'%').add(b'<').add(b'>')
    .add(b'?').add(b'`').add(b'{').add(b'}').add(b'/').add(b'\\');

/// Canonicalizes a serving root. It must exist and be a directory.
pub fn canonical_root(root: &Path) -> Result<PathBuf, Error> {
    let canonical = std::fs::canonicalize(root)
        .map_err(|source| Error::Root { path: root.to_path_buf(), source })?;
    if !canonical.is_dir() {
        return Err(Error::Root {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(canonical)
}

/// Decodes a raw request path. `None` when the bytes are not valid UTF-8.
pub fn decode(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Joins an already-decoded request path onto `root`.
///
/// Returns `None` when the result would leave `root`.
pub fn resolve(root: &Path, decoded: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(decoded).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved.starts_with(root).then_some(resolved)
}

/// Non-empty `/`-separated segments of a decoded path.
pub fn segments(decoded: &str) -> Vec<&str> {
    decoded.split('/').filter(|s| !s.is_empty()).collect()
}

/// Builds `/seg1/seg2/...` with every segment percent-encoded.
/// No segments yields `/`.
pub fn href<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.extend(utf8_percent_encode(segment, SEGMENT));
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_root_requires_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(canonical_root(dir.path()).is_ok());
        assert!(matches!(canonical_root(&file), Err(Error::Root { .. })));
        assert!(matches!(canonical_root(&dir.path().join("missing")), Err(Error::Root { .. })));
    }

    #[test]
    fn decodes_once() {
        assert_eq!(decode("/a%20b/").as_deref(), Some("/a b/"));
        // `%2541` is `%41` after one pass, not `A`.
        assert_eq!(decode("/%2541").as_deref(), Some("/%41"));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(decode("/%ff%fe"), None);
    }

    #[test]
    fn resolves_inside_root() {
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "/"), Some(PathBuf::from("/srv/www")));
        assert_eq!(resolve(root, "/a/./b/"), Some(PathBuf::from("/srv/www/a/b")));
        assert_eq!(resolve(root, "/a/../b"), Some(PathBuf::from("/srv/www/b")));
    }

    #[test]
    fn rejects_traversal() {
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "/../../etc/passwd"), None);
        assert_eq!(resolve(root, "/a/../../www-evil"), None);
    }

    #[test]
    fn sibling_with_common_prefix_is_outside() {
        // String prefix would accept `/srv/www-evil`; component prefix does not.
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "/../www-evil/x"), None);
    }

    #[test]
    fn href_encodes_segments() {
        assert_eq!(href([]), "/");
        assert_eq!(href(["a", "b c"]), "/a/b%20c");
        assert_eq!(href(["100%", "x#y"]), "/100%25/x%23y");
        assert_eq!(href(["目录"]), "/%E7%9B%AE%E5%BD%95");
    }

    #[test]
    fn segments_skip_empty_parts() {
        assert_eq!(segments("/a//b/c/"), ["a", "b", "c"]);
        assert!(segments("/").is_empty());
    }
}
