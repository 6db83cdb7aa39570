// constraint.rs
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Display;

/// A set of letters, kept in sorted order.
///
/// The `Display` form is the canonical rendering: members sorted and
/// deduplicated, e.g. `{'c', 'a', 'a'}` displays as `"ac"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharSet {
    inner: BTreeSet<char>,
}

impl CharSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.inner.contains(&c)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.inner.iter().copied()
    }

    #[must_use]
    pub fn union(&self, other: &CharSet) -> CharSet {
        self.inner.union(&other.inner).copied().collect()
    }

    #[must_use]
    pub fn difference(&self, other: &CharSet) -> CharSet {
        self.inner.difference(&other.inner).copied().collect()
    }

    /// True if every member occurs somewhere in `word`.
    #[must_use]
    pub fn all_in(&self, word: &str) -> bool {
        self.iter().all(|c| word.contains(c))
    }

    /// True if no member occurs anywhere in `word`.
    #[must_use]
    pub fn none_in(&self, word: &str) -> bool {
        self.is_empty() || !word.chars().any(|c| self.contains(c))
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharSet { inner: iter.into_iter().collect() }
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// The constraint currently in effect: a regex shape plus letters a word must
/// and must not contain.
///
/// `include` and `exclude` may overlap. They are checked independently, so a
/// letter in both makes the constraint unsatisfiable; that is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub pattern: String,
    pub include: CharSet,
    pub exclude: CharSet,
}

impl Constraint {
    #[must_use]
    pub fn new(pattern: impl Into<String>, include: CharSet, exclude: CharSet) -> Self {
        Self { pattern: pattern.into(), include, exclude }
    }

    /// True for the initial/reset state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty() && self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), ..self.clone() }
    }

    #[must_use]
    pub fn with_include(&self, include: CharSet) -> Self {
        Self { include, ..self.clone() }
    }

    #[must_use]
    pub fn with_exclude(&self, exclude: CharSet) -> Self {
        Self { exclude, ..self.clone() }
    }

    /// Checks the letter predicates only; the pattern is the engine's business.
    #[must_use]
    pub fn letters_allow(&self, word: &str) -> bool {
        self.include.all_in(word) && self.exclude.none_in(word)
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern=\"{}\" include=\"{}\" exclude=\"{}\"", self.pattern, self.include, self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> CharSet {
        s.chars().collect()
    }

    #[test]
    fn test_charset_display_is_sorted_and_deduplicated() {
        assert_eq!(set("cbaab").to_string(), "abc");
        assert_eq!(CharSet::new().to_string(), "");
    }

    #[test]
    fn test_charset_union_and_difference() {
        assert_eq!(set("c").union(&set("ab")), set("abc"));
        assert_eq!(set("ab").difference(&set("a")), set("b"));
        assert_eq!(set("ab").difference(&set("xyz")), set("ab"));
    }

    #[test]
    fn test_all_in() {
        assert!(set("ca").all_in("cat"));
        assert!(!set("cr").all_in("cat"));
        assert!(CharSet::new().all_in("anything"));
    }

    #[test]
    fn test_none_in() {
        assert!(set("xyz").none_in("cat"));
        assert!(!set("t").none_in("cat"));
        assert!(CharSet::new().none_in("cat"));
    }

    #[test]
    fn test_overlapping_include_exclude_is_unsatisfiable() {
        let constraint = Constraint::new("", set("a"), set("a"));
        assert!(!constraint.letters_allow("cat"));
        assert!(!constraint.letters_allow("dog"));
    }

    #[test]
    fn test_with_builders_leave_other_fields() {
        let base = Constraint::new("ca.", set("c"), set("z"));
        let changed = base.with_include(set("r"));
        assert_eq!(changed.pattern, "ca.");
        assert_eq!(changed.include, set("r"));
        assert_eq!(changed.exclude, set("z"));
        assert_ne!(base, changed);
    }

    #[test]
    fn test_clear() {
        let mut constraint = Constraint::new("ca.", set("c"), set("z"));
        assert!(!constraint.is_empty());
        constraint.clear();
        assert!(constraint.is_empty());
        assert_eq!(constraint, Constraint::default());
    }

    #[test]
    fn test_display() {
        let constraint = Constraint::new("b.t", set("ta"), set("x"));
        assert_eq!(constraint.to_string(), "pattern=\"b.t\" include=\"at\" exclude=\"x\"");
    }
}
