//! Extension lookups for listing rows: a short type description and an icon.
//!
//! Extensions are matched case-insensitively and without the leading dot.

/// Label shown for directories.
pub const DIRECTORY_LABEL: &str = "Directory";

/// Label shown for files whose extension is not in the table.
pub const FILE_LABEL: &str = "File";

pub const FOLDER_ICON: &str = "📁";
pub const PARENT_ICON: &str = "📂";

/// Lowercased extension of `name`, or `""` when it has none.
///
/// A leading dot alone (`.gitignore`) does not start an extension.
pub fn extension(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Type description for a file extension.
pub fn type_label(ext: &str) -> &'static str {
    match ext {
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "jsx" => "React",
        "tsx" => "React TS",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SASS",
        "less" => "LESS",
        "json" => "JSON",
        "md" => "Markdown",
        "txt" => "Text",
        "jpg" | "jpeg" | "png" | "gif" => "Image",
        "svg" => "Vector image",
        "pdf" => "PDF",
        "doc" | "docx" => "Word",
        "xls" | "xlsx" => "Excel",
        "zip" | "rar" | "tar" | "gz" => "Archive",
        _ => FILE_LABEL,
    }
}

/// Icon for a file extension.
pub fn icon(ext: &str) -> &'static str {
    match ext {
        "html" => "🌐",
        "css" | "scss" | "less" => "🎨",
        "json" => "📋",
        "md" | "txt" => "📝",
        "jpg" | "jpeg" | "png" | "gif" | "svg" => "🖼️",
        "pdf" => "📕",
        "doc" | "docx" => "📘",
        "xls" | "xlsx" => "📗",
        "zip" | "rar" | "tar" | "gz" => "📦",
        "mp3" => "🎵",
        "mp4" | "avi" | "mov" => "🎬",
        _ => "📄",
    }
}
