//! Directory listing shown next to a failed load, to help spot a misnamed CSV.

use std::path::Path;

/// Sorted file names in `dir`. Unreadable directories and entries are skipped.
pub fn list_file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "directory listing unavailable");
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Listing of the process working directory.
pub fn list_working_dir() -> Vec<String> {
    list_file_names(Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_file_names_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();

        assert_eq!(list_file_names(dir.path()), vec!["a.txt", "b.csv", "data"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_file_names(&dir.path().join("nope")).is_empty());
    }
}
