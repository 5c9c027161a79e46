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

//! Listing queries and name filters.
//!
//! Filters are compiled objects rather than ad-hoc closures so that listing
//! behavior stays inspectable and testable. They match display names only,
//! never identifiers.

/// A pure predicate over a node's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// Name contains the given substring.
    Contains(String),
    /// Name starts with the given prefix.
    StartsWith(String),
}

impl NameFilter {
    /// Evaluates the filter against a display name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::Contains(s) => name.contains(s.as_str()),
            NameFilter::StartsWith(s) => name.starts_with(s.as_str()),
        }
    }
}

/// Parameters for a listing request.
///
/// When `recursive` is false only direct children are considered. The
/// exclusion filter is applied before the inclusion filter; an excluded
/// folder is also not descended into. `skip_files` removes file-kind nodes
/// from the result independently of the filters.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Descend into sub-folders.
    pub recursive: bool,
    /// Return a children tree instead of a flat sequence.
    pub nested: bool,
    /// Drop file-kind nodes from the result.
    pub skip_files: bool,
    /// Keep only names matching this filter.
    pub include: Option<NameFilter>,
    /// Drop names matching this filter. Wins over `include` on overlap.
    pub exclude: Option<NameFilter>,
}

impl ListQuery {
    /// Creates an empty query: direct children, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables recursive descent.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Returns results as a nested tree.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    /// Drops file-kind nodes.
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Sets the inclusion filter.
    pub fn include(mut self, filter: NameFilter) -> Self {
        self.include = Some(filter);
        self
    }

    /// Sets the exclusion filter.
    pub fn exclude(mut self, filter: NameFilter) -> Self {
        self.exclude = Some(filter);
        self
    }

    /// True if the exclusion filter rejects this name.
    pub fn excludes(&self, name: &str) -> bool {
        self.exclude.as_ref().is_some_and(|f| f.matches(name))
    }

    /// True if the name passes both filters (exclude first, then include).
    pub fn admits(&self, name: &str) -> bool {
        if self.excludes(name) {
            return false;
        }
        self.include.as_ref().is_none_or(|f| f.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_filter() {
        let f = NameFilter::Contains("port".into());
        assert!(f.matches("report.txt"));
        assert!(!f.matches("notes.txt"));
    }

    #[test]
    fn test_starts_with_filter() {
        let f = NameFilter::StartsWith(".".into());
        assert!(f.matches(".env"));
        assert!(!f.matches("env."));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let q = ListQuery::new()
            .include(NameFilter::Contains("env".into()))
            .exclude(NameFilter::StartsWith(".".into()));
        assert!(q.admits("environment.md"));
        assert!(!q.admits(".env"));
        assert!(!q.admits("readme.md"));
    }
}
