//! Package-path validation.
//!
//! Runs before anything is spawned, so a bad path never reaches `go test`.

use std::io::Write;
use std::path::{is_separator, Path};

use crate::constants::{GO_SOURCE_GLOB, GO_SUBPACKAGE_GLOB, RECURSIVE_MARKER};
use crate::error::{Error, Result};

/// Validate package paths in place.
///
/// Recursive entries (anything containing `...`) are trusted as given. Every
/// other entry must be a directory holding Go sources, either directly or one
/// level down; in the latter case the entry is rewritten to `<path>/...` and,
/// unless `quiet`, a note is written to `out`. Order is never changed.
///
/// # Errors
///
/// Stops at the first entry that is missing or holds no Go sources.
pub fn validate(packages: &mut [String], quiet: bool, out: &mut dyn Write) -> Result<()> {
    for pkg in packages.iter_mut() {
        if pkg.contains(RECURSIVE_MARKER) {
            continue;
        }

        let dir = Path::new(pkg.as_str());
        if !dir.is_dir() {
            return Err(Error::PackageNotFound(pkg.clone()));
        }

        if has_match(dir, GO_SOURCE_GLOB) {
            continue;
        }

        if !has_match(dir, GO_SUBPACKAGE_GLOB) {
            return Err(Error::NoGoFiles(pkg.clone()));
        }

        let recursive = recursive_form(pkg);
        tracing::debug!(package = %pkg, rewritten = %recursive, "no direct Go files, using subpackages");
        if !quiet {
            writeln!(
                out,
                "Info: No Go files in '{pkg}', using subpackages instead ({recursive})"
            )?;
        }
        *pkg = recursive;
    }

    Ok(())
}

/// `./pkg/` and `./pkg` both become `./pkg/...`.
fn recursive_form(pkg: &str) -> String {
    let trimmed = pkg.trim_end_matches(is_separator);
    let base = if trimmed.is_empty() { pkg } else { trimmed };
    format!("{base}/{RECURSIVE_MARKER}")
}

fn has_match(dir: &Path, pattern: &str) -> bool {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);
    glob::glob(&full.to_string_lossy())
        .map(|mut paths| paths.any(|entry| entry.is_ok()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "package x\n").unwrap();
    }

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_recursive_entries_are_untouched() {
        let mut packages = vec!["./...".to_string(), "./does-not-exist/...".to_string()];
        let mut out = Vec::new();
        validate(&mut packages, false, &mut out).unwrap();
        assert_eq!(packages, vec!["./...", "./does-not-exist/..."]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let mut packages = vec!["./does-not-exist".to_string()];
        let mut out = Vec::new();
        let err = validate(&mut packages, false, &mut out).unwrap_err();
        assert!(matches!(err, Error::PackageNotFound(_)));
        assert!(err.to_string().contains("does not exist"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_file_is_not_a_package() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        touch(&file);
        let mut packages = vec![path_str(&file)];
        let err = validate(&mut packages, false, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::PackageNotFound(_)));
    }

    #[test]
    fn test_direct_sources_pass_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("lib.go"));
        let mut packages = vec![path_str(dir.path())];
        let mut out = Vec::new();
        validate(&mut packages, false, &mut out).unwrap();
        assert_eq!(packages, vec![path_str(dir.path())]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_subpackages_rewrite_to_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("sub").join("sub.go"));
        let pkg = path_str(dir.path());
        let mut packages = vec![pkg.clone()];
        let mut out = Vec::new();
        validate(&mut packages, false, &mut out).unwrap();

        assert_eq!(packages, vec![format!("{pkg}/...")]);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("using subpackages instead"));
        assert!(text.contains(&format!("({pkg}/...)")));
    }

    #[test]
    fn test_subpackage_note_suppressed_when_quiet() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("sub").join("sub.go"));
        let mut packages = vec![path_str(dir.path())];
        let mut out = Vec::new();
        validate(&mut packages, true, &mut out).unwrap();
        assert!(packages[0].ends_with("/..."));
        assert!(out.is_empty());
    }

    #[test]
    fn test_only_one_level_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a").join("b").join("deep.go"));
        let mut packages = vec![path_str(dir.path())];
        let err = validate(&mut packages, false, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NoGoFiles(_)));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut packages = vec![path_str(dir.path())];
        let err = validate(&mut packages, false, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("No Go files found"));
    }

    #[test]
    fn test_first_failure_stops_the_pass() {
        let good = tempfile::tempdir().unwrap();
        touch(&good.path().join("sub").join("x.go"));
        let mut packages = vec![
            "./does-not-exist".to_string(),
            path_str(good.path()),
        ];
        let mut out = Vec::new();
        assert!(validate(&mut packages, false, &mut out).is_err());
        // The later entry was never looked at.
        assert_eq!(packages[1], path_str(good.path()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_trailing_separator_is_trimmed() {
        assert_eq!(recursive_form("./pkgA/"), "./pkgA/...");
        assert_eq!(recursive_form("./pkgA"), "./pkgA/...");
        assert_eq!(recursive_form("/"), "//...");
    }
}
