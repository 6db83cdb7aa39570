//! Character-set edits for the include/exclude letters.
//!
//! Grammar: an optional leading `+` or `-`, followed by zero or more lowercase
//! letters (`[+-]?[a-z]*`).
//!
//! | Input   | Meaning                          |
//! |---------|----------------------------------|
//! | `ab`    | replace the set with `{a, b}`    |
//! | `+cde`  | add `c`, `d`, `e`                |
//! | `-fgh`  | remove `f`, `g`, `h`             |
//! | *empty* | replace with the empty set       |

use std::str::FromStr;

use crate::constraint::CharSet;
use crate::errors::ConstraintError;

/// What an edit does to the existing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Replace,
    Add,
    Remove,
}

/// A parsed character-set edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSetEdit {
    pub op: EditOp,
    pub letters: CharSet,
}

impl CharSetEdit {
    /// Apply this edit to `existing`, returning the new set.
    #[must_use]
    pub fn apply(&self, existing: &CharSet) -> CharSet {
        match self.op {
            EditOp::Replace => self.letters.clone(),
            EditOp::Add => existing.union(&self.letters),
            EditOp::Remove => existing.difference(&self.letters),
        }
    }
}

impl FromStr for CharSetEdit {
    type Err = ConstraintError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (op, rest) = match input.chars().next() {
            Some('+') => (EditOp::Add, &input[1..]),
            Some('-') => (EditOp::Remove, &input[1..]),
            _ => (EditOp::Replace, input),
        };

        let letters = rest
            .chars()
            .map(|c| match c {
                'a'..='z' => Ok(c),
                '+' | '-' => Err(ConstraintError::MisplacedSign { input: input.to_string(), sign: c }),
                _ => Err(ConstraintError::InvalidEditChar { input: input.to_string(), invalid_char: c }),
            })
            .collect::<Result<CharSet, _>>()?;

        Ok(CharSetEdit { op, letters })
    }
}

/// Parse `input` as an edit and apply it to `existing`.
///
/// # Errors
///
/// Returns a format error if `input` does not follow `[+-]?[a-z]*`.
pub fn apply_edit(existing: &CharSet, input: &str) -> Result<CharSet, ConstraintError> {
    Ok(input.parse::<CharSetEdit>()?.apply(existing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn set(s: &str) -> CharSet {
        s.chars().collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(apply_edit(&set("c"), "+ab").unwrap(), set("abc"));
    }

    #[test]
    fn test_remove() {
        assert_eq!(apply_edit(&set("ab"), "-a").unwrap(), set("b"));
    }

    #[test]
    fn test_replace() {
        assert_eq!(apply_edit(&set("a"), "xy").unwrap(), set("xy"));
    }

    #[test]
    fn test_replace_collapses_duplicates() {
        let result = apply_edit(&CharSet::new(), "banana").unwrap();
        assert_eq!(result, set("abn"));
        assert_eq!(result.to_string(), "abn");
    }

    #[test]
    fn test_empty_input_clears() {
        assert!(apply_edit(&set("abc"), "").unwrap().is_empty());
    }

    #[test]
    fn test_bare_signs_leave_set_unchanged() {
        assert_eq!(apply_edit(&set("abc"), "+").unwrap(), set("abc"));
        assert_eq!(apply_edit(&set("abc"), "-").unwrap(), set("abc"));
    }

    #[test]
    fn test_remove_missing_letters_is_fine() {
        assert_eq!(apply_edit(&set("ab"), "-xyz").unwrap(), set("ab"));
    }

    #[test]
    fn test_digit_rejected() {
        let err = apply_edit(&set("a"), "1a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, ConstraintError::InvalidEditChar { invalid_char: '1', .. }));
    }

    #[test]
    fn test_uppercase_and_space_rejected() {
        assert!(apply_edit(&CharSet::new(), "Ab").is_err());
        assert!(apply_edit(&CharSet::new(), "a b").is_err());
        assert!(apply_edit(&CharSet::new(), "é").is_err());
    }

    #[test]
    fn test_sign_only_allowed_first() {
        let err = apply_edit(&CharSet::new(), "a+b").unwrap_err();
        assert!(matches!(err, ConstraintError::MisplacedSign { sign: '+', .. }));
        assert!(matches!(
            apply_edit(&CharSet::new(), "+-a").unwrap_err(),
            ConstraintError::MisplacedSign { sign: '-', .. }
        ));
    }

    #[test]
    fn test_parse_edit() {
        let edit: CharSetEdit = "+cde".parse().unwrap();
        assert_eq!(edit.op, EditOp::Add);
        assert_eq!(edit.letters, set("cde"));

        let edit: CharSetEdit = "fg".parse().unwrap();
        assert_eq!(edit.op, EditOp::Replace);
    }

    #[test]
    fn test_edit_reusable() {
        let edit: CharSetEdit = "-a".parse().unwrap();
        assert_eq!(edit.apply(&set("abc")), set("bc"));
        assert_eq!(edit.apply(&set("a")), CharSet::new());
    }
}
