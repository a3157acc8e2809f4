//! Path utilities.
//!
//! - Cross-platform path normalization for display
//! - Containment checks before files are rewritten in place
//! - C++ source discovery with gitignore support

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cxx_backport::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\fold.cpp")), "src/fold.cpp");
/// assert_eq!(normalize_display_path(Path::new("./include/meta.hpp")), "include/meta.hpp");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Whether `path` carries one of `extensions` (compared case-insensitively, without the dot).
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Validates that a path is contained within an allowed root directory.
///
/// # Errors
///
/// Returns an error if the path or root cannot be canonicalized,
/// or if the path lies outside the root.
pub fn validate_path_within_root(path: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    let canonical_path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve path {}: {}", path.display(), e))?;
    let canonical_root = root
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve root {}: {}", root.display(), e))?;

    if canonical_path.starts_with(&canonical_root) {
        Ok(canonical_path)
    } else {
        anyhow::bail!(
            "Path traversal detected: {} is outside of {}",
            path.display(),
            root.display()
        )
    }
}

/// Collects C++ sources from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// IN ADDITION to the hardcoded default exclusions (build trees, `third_party`, VCS folders).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `extensions` - File extensions to collect, without the dot
///
/// # Returns
/// Tuple of (sorted source paths, directory count)
#[must_use]
pub fn collect_cpp_files(
    root: &Path,
    exclude: &[String],
    include: &[String],
    extensions: &[String],
) -> (Vec<PathBuf>, usize) {
    use ignore::WalkBuilder;

    let default_excludes = DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned());
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();

    // Remove force-included folders from exclusion list
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();

    // filter_entry prunes excluded directories at traversal time
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if has_extension(path, extensions) {
                    files.push(path.to_path_buf());
                }
            }
            Err(error) => tracing::warn!(%error, "walk error"),
        }
    }

    files.sort();
    (files, dir_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cpp_extensions() -> Vec<String> {
        ["cpp", "hpp", "h"].iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn test_validate_path_within_root() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        let inside = root.join("src/fold.cpp");
        fs::create_dir_all(
            inside
                .parent()
                .ok_or_else(|| anyhow::anyhow!("No parent"))?,
        )?;
        fs::write(&inside, "// test")?;

        assert!(validate_path_within_root(&inside, root).is_ok());

        let outside = root.join("../outside.cpp");
        assert!(validate_path_within_root(&outside, root).is_err());

        let traversal = root.join("src/../../etc/passwd");
        assert!(validate_path_within_root(&traversal, root).is_err());

        Ok(())
    }

    #[test]
    fn test_collect_cpp_files_exclusion() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::write(root.join("main.cpp"), "int main() {}")?;
        fs::write(root.join("meta.hpp"), "#pragma once")?;
        fs::write(root.join("notes.txt"), "not code")?;

        fs::create_dir_all(root.join("build"))?;
        fs::write(root.join("build/generated.cpp"), "// generated")?;

        fs::create_dir_all(root.join("third_party/lib"))?;
        fs::write(root.join("third_party/lib/dep.h"), "// dep")?;

        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src/fold.cpp"), "// fold")?;

        let (files, _) = collect_cpp_files(root, &[], &[], &cpp_extensions());

        let file_names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|f| f.to_str())
            .collect();

        assert_eq!(file_names.len(), 3);
        assert!(file_names.contains(&"main.cpp"));
        assert!(file_names.contains(&"meta.hpp"));
        assert!(file_names.contains(&"fold.cpp"));
        assert!(!file_names.contains(&"generated.cpp"));
        assert!(!file_names.contains(&"dep.h"));

        Ok(())
    }

    #[test]
    fn test_collect_cpp_files_include_overrides_default_exclude() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("third_party"))?;
        fs::write(root.join("third_party/dep.hpp"), "// dep")?;

        let (files, dirs) = collect_cpp_files(
            root,
            &[],
            &["third_party".to_owned()],
            &cpp_extensions(),
        );
        assert_eq!(files.len(), 1);
        assert_eq!(dirs, 1);
        Ok(())
    }

    #[test]
    fn test_is_excluded_wildcard() {
        let excludes = vec!["*.gen".to_owned(), "out".to_owned()];
        assert!(is_excluded("proto.gen", &excludes));
        assert!(is_excluded("out", &excludes));
        assert!(!is_excluded("output", &excludes));
    }

    #[test]
    fn test_has_extension_is_case_insensitive() {
        let extensions = cpp_extensions();
        assert!(has_extension(Path::new("A.CPP"), &extensions));
        assert!(!has_extension(Path::new("a.rs"), &extensions));
        assert!(!has_extension(Path::new("Makefile"), &extensions));
    }
}
