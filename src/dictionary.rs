//! `dictionary`: load and normalize the word list searched by a session
//!
//! The dictionary can be built from any iterator of strings (`from_words`), from an
//! in-memory string (`parse_from_str`) or from a file (`load_from_path`).
//!
//! Text input is read one entry per line. Two line shapes are accepted:
//! - a bare word, e.g. `cat`
//! - a scored crossword entry, e.g. `cat;50`. Entries scoring below `min_score`
//!   are skipped, as are lines whose score does not parse.
//!
//! Text lines are trimmed and blank entries are skipped. Whatever the source,
//! words are lower-cased and the final list is deduplicated and sorted
//! alphabetically. The alphabetical order is what gives match lists (and
//! therefore pages) a stable order.

/// An immutable, normalized word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from raw words.
    ///
    /// Each word is lower-cased and duplicates collapsed (case-insensitively,
    /// since we lowercase first). Words are otherwise kept as given, so an
    /// empty or padded word stays in the set.
    pub fn from_words<I, S>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();

        // `dedup` only removes adjacent duplicates, so sort first.
        words.sort_unstable();
        words.dedup();

        Dictionary { words }
    }

    /// Parse a word list from an in-memory string.
    ///
    /// # Arguments
    /// * `contents`: One entry per line, either `word` or `word;score`.
    /// * `min_score`: Scored entries below this are skipped. Bare words are always kept.
    ///
    /// Words are trimmed; lines that leave an empty word are skipped.
    pub fn parse_from_str(contents: &str, min_score: i32) -> Dictionary {
        let entries = contents.lines().filter_map(|raw_line| {
            let word = match raw_line.split_once(';') {
                Some((word, score_raw)) => {
                    let score: i32 = score_raw.trim().parse().ok()?;
                    (score >= min_score).then_some(word)?
                }
                None => raw_line,
            }
            .trim();
            (!word.is_empty()).then_some(word)
        });

        Self::from_words(entries)
    }

    /// Read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P, min_score: i32) -> std::io::Result<Dictionary> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read dictionary from '{}': {}", path_ref.display(), e),
            )
        })?;

        let dictionary = Self::parse_from_str(&data, min_score);
        log::debug!("Loaded {} words from {}", dictionary.len(), path_ref.display());
        Ok(dictionary)
    }

    /// The words, in alphabetical order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}
