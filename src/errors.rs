//! Error types for constraint handling, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E004) for documentation lookup:
//!
//! - E001: `InvalidPattern` (Pattern does not compile as a regular expression)
//! - E002: `PatternExecution` (Regex engine failed while matching a word)
//! - E003: `InvalidEditChar` (Character edit contains something other than a-z)
//! - E004: `MisplacedSign` (`+` or `-` appears after the first position)
//!
//! E001 and E002 are *pattern* errors; E003 and E004 are *format* errors.
//! See [`ErrorKind`].
//!
//! # Examples
//!
//! ```
//! use wordling::editor::apply_edit;
//! use wordling::constraint::CharSet;
//! use wordling::errors::ErrorKind;
//!
//! let existing: CharSet = "ab".chars().collect();
//! match apply_edit(&existing, "1a") {
//!     Err(e) => {
//!         assert_eq!(e.kind(), ErrorKind::Format);
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

/// Broad category of a [`ConstraintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The pattern could not be compiled or executed.
    Pattern,
    /// A character-set edit did not follow the `[+-]?[a-z]*` grammar.
    Format,
}

/// Errors raised while building or evaluating a constraint.
#[derive(Debug, thiserror::Error)]
pub enum ConstraintError {
    #[error("Invalid regex pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Pattern \"{pattern}\" failed while matching: {source}")]
    PatternExecution {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Invalid character '{invalid_char}' in \"{input}\" (only lowercase a-z allowed)")]
    InvalidEditChar { input: String, invalid_char: char },

    #[error("Misplaced '{sign}' in \"{input}\" (a sign may only appear first)")]
    MisplacedSign { input: String, sign: char },
}

impl From<ConstraintError> for std::io::Error {
    fn from(ce: ConstraintError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, ce.to_string())
    }
}

impl ConstraintError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintError::InvalidPattern { .. } => "E001",
            ConstraintError::PatternExecution { .. } => "E002",
            ConstraintError::InvalidEditChar { .. } => "E003",
            ConstraintError::MisplacedSign { .. } => "E004",
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConstraintError::InvalidPattern { .. } | ConstraintError::PatternExecution { .. } => {
                ErrorKind::Pattern
            }
            ConstraintError::InvalidEditChar { .. } | ConstraintError::MisplacedSign { .. } => {
                ErrorKind::Format
            }
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ConstraintError::InvalidPattern { .. } => {
                Some("Use a regular expression such as 'ca.', 'b[aeiou]+t' or '.*ing'")
            }
            ConstraintError::PatternExecution { .. } => {
                Some("Simplify the pattern; nested repetition can exhaust the backtracking limit")
            }
            ConstraintError::InvalidEditChar { .. } => {
                Some("Enter letters to replace the set ('ab'), add to it ('+cde') or remove from it ('-fgh')")
            }
            ConstraintError::MisplacedSign { .. } => {
                Some("Put a single '+' or '-' before the letters, e.g. '+cde' or '-fgh'")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
