// src/core/sanitize.rs

/// Make an uploaded file name safe to use as a path component.
/// ASCII letters/digits, `.`, `-`, `_` survive; whitespace becomes `_`;
/// everything else (path separators, CJK, …) is dropped.
/// Leading dots/underscores are trimmed so nothing turns into a hidden file.
pub fn secure_filename(name: &str) -> String {
    // Only the last path component counts.
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let mut out = String::with_capacity(base.len());
    let mut last_us = false;
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
            out.push(ch); last_us = false;
        } else if ch == '_' || ch.is_whitespace() {
            if !last_us { out.push('_'); last_us = true; }
        }
    }
    out.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Only `.csv` uploads are accepted (case-insensitive).
pub fn allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_filename_strips_paths_and_cjk() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\tmp\\估值 2025-12-24.csv"), "2025-12-24.csv");
        assert_eq!(secure_filename("my  data file.CSV"), "my_data_file.CSV");
        assert_eq!(secure_filename("..."), "");
    }

    #[test]
    fn only_csv_allowed() {
        assert!(allowed_file("a.csv"));
        assert!(allowed_file("A.CSV"));
        assert!(allowed_file("x.tar.csv"));
        assert!(!allowed_file("a.xlsx"));
        assert!(!allowed_file("csv"));
    }
}
