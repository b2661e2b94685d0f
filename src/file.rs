// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// One CSV file in a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub size: u64,
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure parent dir exists, then create/truncate `path` with `contents`.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Write CSV text; callers pass text that already carries its BOM.
pub fn write_bom_csv(path: &Path, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    debug_assert!(text.starts_with(crate::csv::UTF8_BOM));
    write_file(path, text.as_bytes())
}

/// `*.csv` files directly under `dir`, names sorted descending (newest date first).
/// A missing directory is an empty listing.
pub fn list_csv_files(dir: &Path) -> Result<Vec<CsvEntry>, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() { continue; }
        let Some(name) = path.file_name().and_then(|s| s.to_str()).map(str::to_string) else { continue };
        if !name.ends_with(".csv") { continue; }

        let meta = entry.metadata()?;
        out.push(CsvEntry {
            name,
            path,
            modified: meta.modified().ok(),
            size: meta.len(),
        });
    }

    out.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(out)
}

/// Exists and has at least one byte.
pub fn is_nonempty_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_sorts_descending_and_skips_other_files() {
        let dir = std::env::temp_dir().join("fund_temp_file_listing");
        let _ = fs::remove_dir_all(&dir);
        write_file(&dir.join("2025-01-02.csv"), b"a").unwrap();
        write_file(&dir.join("2025-03-01.csv"), b"ab").unwrap();
        write_file(&dir.join("notes.txt"), b"x").unwrap();

        let names: Vec<String> = list_csv_files(&dir).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["2025-03-01.csv", "2025-01-02.csv"]);
        assert!(list_csv_files(&dir.join("missing")).unwrap().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
