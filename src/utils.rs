// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Lowercase a display name and replace spaces with dashes
pub fn slugify_label(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Media type declared for a file name, by extension
pub fn content_type_for(file_name: &str) -> &'static str {
    match get_file_extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Strip trailing slashes so endpoint paths can be appended
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
