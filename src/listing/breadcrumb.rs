use crate::path;

/// One link in the navigation trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

/// Trail from the root to the directory named by `segments`.
///
/// The root comes first and links to `/`; each segment links to its
/// cumulative prefix (`/a`, `/a/b`, ...).
pub fn breadcrumbs(segments: &[&str], root_label: &str) -> Vec<Breadcrumb> {
    let mut trail = Vec::with_capacity(segments.len() + 1);
    trail.push(Breadcrumb { label: root_label.to_owned(), href: "/".to_owned() });
    for depth in 1..=segments.len() {
        trail.push(Breadcrumb {
            label: segments[depth - 1].to_owned(),
            href: path::href(segments[..depth].iter().copied()),
        });
    }
    trail
}

/// Link to the enclosing directory, or `None` at the root.
pub fn parent_href(segments: &[&str]) -> Option<String> {
    let (_, parent) = segments.split_last()?;
    Some(path::href(parent.iter().copied()))
}
