//! HTML presentation of a [`Listing`].

use super::file_type::PARENT_ICON;
use super::{EntryKind, Listing, Row};

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 20px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; }
.container { max-width: 1000px; margin: 0 auto; background: white; border-radius: 12px; box-shadow: 0 20px 60px rgba(0,0,0,0.3); overflow: hidden; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; }
.header h1 { margin: 0; font-size: 28px; display: flex; align-items: center; gap: 10px; }
.header h1:before { content: '📁'; font-size: 36px; }
.breadcrumb { margin-top: 10px; font-size: 14px; opacity: 0.9; }
.breadcrumb a { color: white; text-decoration: none; transition: opacity 0.2s; }
.breadcrumb a:hover { opacity: 0.8; text-decoration: underline; }
.content { padding: 30px; }
.file-item { display: flex; align-items: center; padding: 15px; border-bottom: 1px solid #eee; transition: background 0.2s; text-decoration: none; color: #333; }
.file-item:hover { background: #f8f9fa; border-radius: 8px; }
.file-icon { width: 40px; text-align: center; font-size: 24px; margin-right: 15px; }
.file-info { flex: 1; }
.file-name { font-weight: 500; font-size: 16px; }
.file-meta { font-size: 12px; color: #666; margin-top: 4px; display: flex; gap: 15px; }
.file-size { font-family: 'Monaco', 'Menlo', monospace; }
.folder .file-name { color: #667eea; font-weight: 600; }
.parent-dir { background: #f8f9fa; border-radius: 8px; margin-bottom: 20px; }
.parent-dir .file-name { color: #764ba2; }
.empty-dir { text-align: center; color: #666; padding: 40px; font-size: 18px; }
"#;

// Ctrl/Cmd-click opens a new tab; double-clicking a folder opens a new window.
const SCRIPT: &str = r#"
document.querySelectorAll('.file-item[href]').forEach(function (link) {
  link.addEventListener('click', function (e) {
    if (e.ctrlKey || e.metaKey) { e.preventDefault(); window.open(link.href, '_blank'); }
  });
});
document.querySelectorAll('.folder').forEach(function (folder) {
  folder.addEventListener('dblclick', function () { window.open(folder.href, '_blank'); });
});
"#;

/// Renders a complete HTML document for `listing`.
pub fn render(listing: &Listing) -> String {
    let crumbs = listing.breadcrumbs.iter()
        .map(|b| format!(r#"<a href="{}">{}</a>"#, escape(&b.href), escape(&b.label)))
        .collect::<Vec<_>>()
        .join(" / ");

    let mut content = String::new();
    if let Some(parent) = &listing.parent {
        content.push_str(&parent_row(parent));
    }
    if listing.rows.is_empty() {
        content.push_str(r#"<div class="empty-dir">📭 Empty directory</div>"#);
    }
    for row in &listing.rows {
        content.push_str(&entry_row(row));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Index of {path}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>{title}</h1>
<div class="breadcrumb">{crumbs}</div>
</div>
<div class="content">
{content}</div>
</div>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        path = escape(&listing.path),
        title = escape(&listing.title),
    )
}

fn parent_row(href: &str) -> String {
    format!(
        r#"<a href="{href}" class="file-item parent-dir">
<div class="file-icon">{PARENT_ICON}</div>
<div class="file-info">
<div class="file-name">.. (parent directory)</div>
<div class="file-meta"><span>{label}</span></div>
</div>
</a>
"#,
        href = escape(href),
        label = super::DIRECTORY_LABEL,
    )
}

fn entry_row(row: &Row) -> String {
    let (class, suffix) = match row.kind {
        EntryKind::Directory => ("folder", "/"),
        EntryKind::File => ("file", ""),
    };
    let size = row.size.as_deref()
        .map(|s| format!(r#"<span class="file-size">{s}</span>"#))
        .unwrap_or_default();
    let modified = row.modified.as_deref()
        .map(|m| format!(r#"<span class="file-modified">{m}</span>"#))
        .unwrap_or_default();

    format!(
        r#"<a href="{href}" class="file-item {class}">
<div class="file-icon">{icon}</div>
<div class="file-info">
<div class="file-name">{name}{suffix}</div>
<div class="file-meta"><span class="file-type">{label}</span>{size}{modified}</div>
</div>
</a>
"#,
        href = escape(&row.href),
        icon = row.icon,
        name = escape(&row.name),
        label = row.type_label,
    )
}

/// Escapes text for HTML element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
