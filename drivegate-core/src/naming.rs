// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collision-safe naming.
//!
//! Given the names already present in a container and a desired display
//! name, decides the name to actually use. Disambiguation appends a numeric
//! suffix — `stem (n).ext` for files, `name (n)` for folders — with n
//! counting 1, 2, 3, … so repeated calls under the same starting conditions
//! are reproducible.
//!
//! Name comparison is byte-exact: no case folding, no Unicode
//! normalization. The local backend is treated as case-sensitive.

use crate::error::{GatewayError, Result};

/// Validates a desired display name before any listing call is made.
///
/// Rejects empty names, path separators, NUL bytes and the `.`/`..`
/// traversal names.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GatewayError::invalid_name(name, "name is empty"));
    }
    if name == "." || name == ".." {
        return Err(GatewayError::invalid_name(name, "reserved name"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(GatewayError::invalid_name(name, "name contains a path separator"));
    }
    if name.contains('\0') {
        return Err(GatewayError::invalid_name(name, "name contains a NUL byte"));
    }
    Ok(())
}

/// Splits a file name into stem and extension.
///
/// The extension is everything after the last dot, unless the dot is the
/// leading character: dotfiles like `.env` are treated as extensionless.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
    }
}

/// Formats the n-th disambiguation candidate for a desired name.
fn candidate(desired: &str, n: u32, is_folder: bool) -> String {
    if is_folder {
        return format!("{desired} ({n})");
    }
    match split_name(desired) {
        (stem, Some(ext)) => format!("{stem} ({n}).{ext}"),
        (stem, None) => format!("{stem} ({n})"),
    }
}

/// Picks the name to actually use inside a container.
///
/// `existing` holds the display names of the container's current children.
/// With collision prevention disabled the desired name is returned
/// unchanged — overwrite policy is then owned by the backend.
pub fn resolve_name(
    existing: &[String],
    desired: &str,
    is_folder: bool,
    prevent_collision: bool,
) -> String {
    if !prevent_collision || !existing.iter().any(|n| n == desired) {
        return desired.to_string();
    }
    let mut n = 1u32;
    loop {
        let name = candidate(desired, n, is_folder);
        if !existing.iter().any(|e| *e == name) {
            return name;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_name_rejects_bad_input() {
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("a\0b").is_err());
        assert!(validate_name("report.txt").is_ok());
        assert!(validate_name(".env").is_ok());
    }

    #[test]
    fn test_no_collision_keeps_name() {
        let existing = names(&["other.txt"]);
        assert_eq!(resolve_name(&existing, "report.txt", false, true), "report.txt");
    }

    #[test]
    fn test_prevention_disabled_keeps_name() {
        let existing = names(&["report.txt"]);
        assert_eq!(resolve_name(&existing, "report.txt", false, false), "report.txt");
    }

    #[test]
    fn test_file_suffix_goes_before_extension() {
        let existing = names(&["report.txt"]);
        assert_eq!(resolve_name(&existing, "report.txt", false, true), "report (1).txt");
    }

    #[test]
    fn test_suffixes_are_monotonic() {
        let existing = names(&["report.txt", "report (1).txt", "report (2).txt"]);
        assert_eq!(resolve_name(&existing, "report.txt", false, true), "report (3).txt");
    }

    #[test]
    fn test_folder_suffix_goes_after_full_name() {
        let existing = names(&["archive"]);
        assert_eq!(resolve_name(&existing, "archive", true, true), "archive (1)");
    }

    #[test]
    fn test_extensionless_file() {
        let existing = names(&["Makefile"]);
        assert_eq!(resolve_name(&existing, "Makefile", false, true), "Makefile (1)");
    }

    #[test]
    fn test_dotfile_treated_as_extensionless() {
        let existing = names(&[".env"]);
        assert_eq!(resolve_name(&existing, ".env", false, true), ".env (1)");
    }

    // Collision policy: comparison is byte-exact. Names differing only in
    // case do not collide, because the backend is treated as case-sensitive.
    #[test]
    fn test_comparison_is_case_sensitive() {
        let existing = names(&["Report.txt"]);
        assert_eq!(resolve_name(&existing, "report.txt", false, true), "report.txt");
    }
}
