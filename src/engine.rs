//! Constraint engine: filters a [`Dictionary`] down to the words satisfying a
//! [`Constraint`], and memoizes the last result.
//!
//! A word matches iff
//! 1. it *fully* matches the pattern (anchored at both ends),
//! 2. it contains every `include` letter, and
//! 3. it contains no `exclude` letter.
//!
//! An empty pattern only matches the empty string, so unless the dictionary
//! holds an empty word, an empty pattern yields no matches.
//!
//! # Examples
//!
//! ```
//! use wordling::constraint::Constraint;
//! use wordling::dictionary::Dictionary;
//! use wordling::engine::MatchCache;
//!
//! let dictionary = Dictionary::from_words(["cat", "car", "can", "dog"]);
//! let constraint = Constraint::new("ca.", "r".chars().collect(), Default::default());
//!
//! let mut cache = MatchCache::new();
//! let matches = cache.matches(&dictionary, &constraint)?;
//! assert_eq!(&matches[..], ["car"]);
//! # Ok::<(), wordling::errors::ConstraintError>(())
//! ```

use std::rc::Rc;

use fancy_regex::Regex;
use log::debug;

use crate::constraint::Constraint;
use crate::dictionary::Dictionary;
use crate::errors::ConstraintError;

/// Compile `pattern` for full-match use.
///
/// The pattern is compiled on its own first, so that input like `a)|(b` is
/// rejected instead of being re-read once wrapped in `^(?:...)$`.
///
/// A verbose-mode (`(?x)`) pattern ending in a `#` comment would swallow the
/// closing `)$`; in that case the comment is terminated with a newline, which
/// verbose mode ignores.
///
/// # Errors
///
/// Returns [`ConstraintError::InvalidPattern`] if `pattern` is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConstraintError> {
    let invalid = |e: fancy_regex::Error| ConstraintError::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(e),
    };

    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{pattern})$"))
        .or_else(|_| Regex::new(&format!("^(?:{pattern}\n)$")))
        .map_err(invalid)
}

/// Return every word of `dictionary` matching `constraint`, in alphabetical order.
///
/// # Errors
///
/// Returns a pattern error if the pattern does not compile, or if the regex
/// engine gives up on a word (e.g. backtracking limit exceeded).
pub fn find_matches(dictionary: &Dictionary, constraint: &Constraint) -> Result<Vec<String>, ConstraintError> {
    let regex = compile_pattern(&constraint.pattern)?;

    let mut matches = Vec::new();
    for word in dictionary.iter() {
        // letter checks are cheap; do them before running the regex
        if !constraint.letters_allow(word) {
            continue;
        }
        let is_match = regex.is_match(word).map_err(|e| ConstraintError::PatternExecution {
            pattern: constraint.pattern.clone(),
            source: Box::new(e),
        })?;
        if is_match {
            matches.push(word.to_string());
        }
    }

    // Dictionary words are already sorted; keep the ordering explicit anyway.
    debug_assert!(matches.windows(2).all(|w| w[0] < w[1]));

    Ok(matches)
}

/// Memoized result of the last [`find_matches`] call.
///
/// The cache is valid iff the constraint it was computed for equals the one
/// being asked about. Any difference forces a recompute before anything is
/// returned.
#[derive(Debug, Default)]
pub struct MatchCache {
    last: Option<(Constraint, Rc<[String]>)>,
    recomputations: usize,
}

impl MatchCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches for `constraint`, recomputing only if it differs from the cached one.
    ///
    /// Repeated calls with an unchanged constraint return the same `Rc`.
    /// On error the cache is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates pattern errors from [`find_matches`].
    pub fn matches(&mut self, dictionary: &Dictionary, constraint: &Constraint) -> Result<Rc<[String]>, ConstraintError> {
        if let Some((cached, matches)) = &self.last {
            if cached == constraint {
                return Ok(Rc::clone(matches));
            }
        }

        let matches: Rc<[String]> = find_matches(dictionary, constraint)?.into();
        self.recomputations += 1;
        debug!("Recomputed {} matches for {constraint}", matches.len());

        self.last = Some((constraint.clone(), Rc::clone(&matches)));
        Ok(matches)
    }

    /// The constraint the cached matches belong to, if any.
    #[must_use]
    pub fn cached_constraint(&self) -> Option<&Constraint> {
        self.last.as_ref().map(|(c, _)| c)
    }

    /// Number of times the match list has actually been recomputed.
    #[must_use]
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
