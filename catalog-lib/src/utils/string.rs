use std::path::Path;

/// Characters removed from header text before alias matching
const STRIPPED_HEADER_CHARS: [char; 5] = [' ', '_', '-', '(', ')'];

/// Normalize a column header for alias matching
/// Lowercases the text and strips spaces, underscores, hyphens and parentheses
/// The result is only ever compared against aliases, never shown to the user
pub fn normalize_header(value: &str) -> String {
    let stripped: String = value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_HEADER_CHARS.contains(c))
        .collect();

    // Stripping can expose whitespace such as tabs at either end
    stripped.trim().to_string()
}

/// Basename of `file_name` with its last extension removed
/// "reports/Stock List.v2.xlsx" -> "Stock List.v2", ".hidden" -> ".hidden"
pub fn strip_extension(file_name: &str) -> String {
    let path = Path::new(file_name);
    let base = path
        .file_name()
        .map(Path::new)
        .unwrap_or(path);

    base.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
