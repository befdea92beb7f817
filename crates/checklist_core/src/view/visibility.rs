//! Search and filter passes over the rendered list.
//!
//! # Responsibility
//! - Hide or show rendered nodes by title query or by done state.
//! - Remember the raw search text and selected filter as form field values.
//!
//! # Invariants
//! - Passes only flip `RenderedNode::hidden`; nodes are never added, removed
//!   or retitled, and storage is never touched.
//! - Each pass overwrites the visibility left by the previous one
//!   (last writer wins).

use crate::view::render::{ListView, RenderedNode};
use log::debug;
use regex::{Regex, RegexBuilder};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Category selector value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Done,
    Todo,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::Todo => "todo",
        }
    }

    fn admits(self, node: &RenderedNode) -> bool {
        match self {
            Self::All => true,
            Self::Done => node.done,
            Self::Todo => !node.done,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector value outside `all|done|todo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterMode(pub String);

impl Display for UnknownFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown filter mode `{}`; expected all|done|todo", self.0)
    }
}

impl std::error::Error for UnknownFilterMode {}

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "all" => Ok(Self::All),
            "done" => Ok(Self::Done),
            "todo" => Ok(Self::Todo),
            other => Err(UnknownFilterMode(other.to_string())),
        }
    }
}

/// Compiled-size cap for title patterns; regex's own default.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Case-insensitive literal substring matcher for titles.
#[derive(Debug, Clone)]
pub enum TitleMatcher {
    /// Empty query.
    Any,
    Pattern(Regex),
    /// Used when the escaped query exceeds the regex size limit.
    Lowercase(String),
}

impl TitleMatcher {
    /// Builds a matcher for `query`. An empty query matches every title.
    pub fn new(query: &str) -> Self {
        Self::with_size_limit(query, PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(query: &str, size_limit: usize) -> Self {
        if query.is_empty() {
            return Self::Any;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
        {
            Ok(pattern) => Self::Pattern(pattern),
            Err(err) => {
                debug!("event=search_compile module=view status=fallback error={err}");
                Self::Lowercase(query.to_lowercase())
            }
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(pattern) => pattern.is_match(title),
            Self::Lowercase(needle) => title.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Shows nodes whose title contains `query`, ignoring case; hides the rest.
pub fn apply_search(view: &mut ListView, query: &str) {
    let matcher = TitleMatcher::new(query);
    for node in view.nodes_mut() {
        node.hidden = !matcher.matches(&node.title);
    }
}

/// Shows nodes admitted by `mode`; hides the rest.
pub fn apply_filter(view: &mut ListView, mode: FilterMode) {
    for node in view.nodes_mut() {
        node.hidden = !mode.admits(node);
    }
}

/// Current values of the search field and the filter selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityControls {
    search_text: String,
    filter: FilterMode,
}

impl VisibilityControls {
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Records the search field text and runs a search pass.
    pub fn search(&mut self, view: &mut ListView, query: &str) {
        self.search_text = query.to_string();
        apply_search(view, query);
    }

    /// Records the selected mode and runs a filter pass.
    pub fn select_filter(&mut self, view: &mut ListView, mode: FilterMode) {
        self.filter = mode;
        apply_filter(view, mode);
    }

    /// Empties the search field and shows every node.
    ///
    /// The selector keeps its value but is not re-applied.
    pub fn clear_search(&mut self, view: &mut ListView) {
        self.search(view, "");
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterMode, TitleMatcher};

    #[test]
    fn matcher_is_case_insensitive_literal() {
        let matcher = TitleMatcher::new("MiLk");
        assert!(matcher.matches("Buy milk"));
        assert!(!matcher.matches("Buy bread"));

        let dotted = TitleMatcher::new("a.c");
        assert!(dotted.matches("xa.cx"));
        assert!(!dotted.matches("abc"));
    }

    #[test]
    fn matcher_folds_non_ascii_case() {
        assert!(TitleMatcher::new("ÇAFÉ").matches("café com leite"));
    }

    #[test]
    fn oversized_pattern_falls_back_to_lowercase_contains() {
        let matcher = TitleMatcher::with_size_limit("MiLk.", 1);
        assert!(matches!(matcher, TitleMatcher::Lowercase(_)));
        assert!(matcher.matches("Buy milk."));
        assert!(matcher.matches("CAFÉ MILK. run"));
        assert!(!matcher.matches("Buy milk"));
        assert!(TitleMatcher::with_size_limit("Ça", 1).matches("çava"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(TitleMatcher::new("").matches(""));
        assert!(TitleMatcher::new("").matches("anything"));
    }

    #[test]
    fn filter_mode_parses_selector_values() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!(" done ".parse::<FilterMode>().unwrap(), FilterMode::Done);
        assert_eq!("todo".parse::<FilterMode>().unwrap(), FilterMode::Todo);
        let err = "later".parse::<FilterMode>().unwrap_err();
        assert_eq!(err.0, "later");
        assert_eq!(FilterMode::Done.to_string(), "done");
    }
}
