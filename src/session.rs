//! The interactive session: owns the live [`Constraint`], the match cache and
//! the page cursor, and turns key events into state transitions.
//!
//! # States
//!
//! - `Browsing`: steady state, waiting for a key.
//! - `EditingPattern` / `EditingInclude` / `EditingExclude`: one blocking line
//!   exchange, then back to `Browsing`.
//! - `Quit`: terminal.
//!
//! Before the first key is read, [`Session::run`] forces one pattern edit, so
//! the user always gets to supply a pattern before browsing.
//!
//! Every constraint change (edit or reset) sends the cursor back to page 0.
//! Page moves only touch the cursor.
//!
//! Input and output go through the [`KeySource`], [`LineSource`] and
//! [`Renderer`] traits; the session itself never touches a terminal.
//!
//! # Cancelling an edit
//!
//! A [`LineSource`] may return `Ok(None)` to cancel an edit. The constraint is
//! then left as it was. Without a cancel, invalid input is requested again
//! until a valid line arrives.

use std::io;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::rc::Rc;

use log::{debug, warn};

use crate::constraint::{CharSet, Constraint};
use crate::dictionary::Dictionary;
use crate::editor::apply_edit;
use crate::engine::MatchCache;
use crate::errors::ConstraintError;
use crate::pagination::{self, Direction};

/// A raw key, as delivered by whatever reads the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Char(char),
    Enter,
    Esc,
    /// Ctrl-C or equivalent.
    Interrupt,
    Other,
}

/// The closed set of events the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Next,
    Prev,
    EditPattern,
    EditInclude,
    EditExclude,
    Reset,
    Quit,
    Other,
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        match key {
            Key::Right => Event::Next,
            Key::Left => Event::Prev,
            Key::Char('p') => Event::EditPattern,
            Key::Char('i') => Event::EditInclude,
            Key::Char('e') => Event::EditExclude,
            Key::Char('r') => Event::Reset,
            Key::Char('q') | Key::Interrupt => Event::Quit,
            Key::Char(_) | Key::Enter | Key::Esc | Key::Other => Event::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    EditingPattern,
    EditingInclude,
    EditingExclude,
    Quit,
}

/// Which line is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Pattern,
    Include,
    Exclude,
}

impl Prompt {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Prompt::Pattern => "Enter a regex pattern: ",
            Prompt::Include => "Enter characters to include (e.g., 'ab', '+cde', '-fgh'): ",
            Prompt::Exclude => "Enter characters to exclude (e.g., 'ab', '+cde', '-fgh'): ",
        }
    }
}

/// One entry of the control legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub key: &'static str,
    pub description: &'static str,
}

/// The static control legend, in display order.
pub const CONTROLS: [Control; 7] = [
    Control { key: "p", description: "input pattern" },
    Control { key: "i", description: "input include characters" },
    Control { key: "e", description: "input exclude characters" },
    Control { key: "←", description: "previous page" },
    Control { key: "→", description: "next page" },
    Control { key: "r", description: "reset" },
    Control { key: "q", description: "quit" },
];

/// Blocking single-key input.
pub trait KeySource {
    /// # Errors
    /// Any I/O failure of the underlying device.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Blocking line input. `Ok(None)` cancels the edit in progress.
pub trait LineSource {
    /// # Errors
    /// Any I/O failure of the underlying device.
    fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>>;
}

/// Draws the session and reports rejected input.
pub trait Renderer {
    /// # Errors
    /// Any I/O failure of the underlying device.
    fn render(&mut self, view: &SessionView<'_>) -> io::Result<()>;

    /// # Errors
    /// Any I/O failure of the underlying device.
    fn report_error(&mut self, error: &ConstraintError) -> io::Result<()>;
}

/// Everything a session needs from the outside world.
pub trait SessionIo: KeySource + LineSource + Renderer {}

impl<T: KeySource + LineSource + Renderer> SessionIo for T {}

/// A match on the current page, with its 1-based position in the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry<'a> {
    pub index: usize,
    pub word: &'a str,
}

/// Read-only snapshot of what should be on screen.
#[derive(Debug, Clone)]
pub struct SessionView<'a> {
    pub pattern: &'a str,
    pub include: &'a CharSet,
    pub exclude: &'a CharSet,
    pub mode: Mode,
    /// 0-based; add one for display.
    pub page: usize,
    pub total_pages: usize,
    pub page_size: NonZeroUsize,
    pub controls: &'static [Control],
    matches: Rc<[String]>,
    range: Range<usize>,
}

impl SessionView<'_> {
    /// Matches on the current page.
    pub fn entries(&self) -> impl Iterator<Item = PageEntry<'_>> {
        self.matches[self.range.clone()]
            .iter()
            .zip(self.range.clone())
            .map(|(word, i)| PageEntry { index: i + 1, word })
    }

    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum LetterField {
    Include,
    Exclude,
}

/// The session state machine. See the module docs.
#[derive(Debug)]
pub struct Session<'d> {
    dictionary: &'d Dictionary,
    constraint: Constraint,
    cache: MatchCache,
    page: usize,
    page_size: NonZeroUsize,
    mode: Mode,
}

impl<'d> Session<'d> {
    #[must_use]
    pub fn new(dictionary: &'d Dictionary, page_size: NonZeroUsize) -> Self {
        Self {
            dictionary,
            constraint: Constraint::default(),
            cache: MatchCache::new(),
            page: 0,
            page_size,
            mode: Mode::Browsing,
        }
    }

    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn cache(&self) -> &MatchCache {
        &self.cache
    }

    /// Matches for the live constraint (cached).
    ///
    /// # Errors
    /// Pattern errors from the engine.
    pub fn matches(&mut self) -> Result<Rc<[String]>, ConstraintError> {
        self.cache.matches(self.dictionary, &self.constraint)
    }

    /// # Errors
    /// Pattern errors from the engine.
    pub fn total_pages(&mut self) -> Result<usize, ConstraintError> {
        Ok(pagination::total_pages(self.matches()?.len(), self.page_size))
    }

    /// Snapshot for the renderer.
    ///
    /// # Errors
    /// Pattern errors from the engine.
    pub fn view(&mut self) -> Result<SessionView<'_>, ConstraintError> {
        let matches = self.cache.matches(self.dictionary, &self.constraint)?;
        let total_pages = pagination::total_pages(matches.len(), self.page_size);
        let range = pagination::page_range(self.page, self.page_size, matches.len());

        Ok(SessionView {
            pattern: &self.constraint.pattern,
            include: &self.constraint.include,
            exclude: &self.constraint.exclude,
            mode: self.mode,
            page: self.page,
            total_pages,
            page_size: self.page_size,
            controls: &CONTROLS,
            matches,
            range,
        })
    }

    /// Move the page cursor; saturates at either end.
    ///
    /// # Errors
    /// Pattern errors from the engine.
    pub fn move_page(&mut self, direction: Direction) -> Result<(), ConstraintError> {
        let total = self.total_pages()?;
        self.page = pagination::move_page(self.page, direction, total);
        Ok(())
    }

    /// Replace the live constraint with `candidate` and go back to page 0.
    ///
    /// The candidate's matches are computed first; if that fails, nothing changes.
    ///
    /// # Errors
    /// Pattern errors from the engine.
    pub fn commit(&mut self, candidate: Constraint) -> Result<(), ConstraintError> {
        self.cache.matches(self.dictionary, &candidate)?;
        debug!("Committed {candidate}");
        self.constraint = candidate;
        self.page = 0;
        Ok(())
    }

    /// # Errors
    /// [`ConstraintError::InvalidPattern`] if `pattern` does not compile; the
    /// previous pattern is kept.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), ConstraintError> {
        self.commit(self.constraint.with_pattern(pattern))
    }

    /// Apply a `[+-]?[a-z]*` edit to the include letters.
    ///
    /// # Errors
    /// Format errors from the editor, or pattern errors from the engine.
    pub fn edit_include(&mut self, input: &str) -> Result<(), ConstraintError> {
        self.edit_letters(LetterField::Include, input)
    }

    /// Apply a `[+-]?[a-z]*` edit to the exclude letters.
    ///
    /// # Errors
    /// Format errors from the editor, or pattern errors from the engine.
    pub fn edit_exclude(&mut self, input: &str) -> Result<(), ConstraintError> {
        self.edit_letters(LetterField::Exclude, input)
    }

    fn edit_letters(&mut self, field: LetterField, input: &str) -> Result<(), ConstraintError> {
        let candidate = match field {
            LetterField::Include => self.constraint.with_include(apply_edit(&self.constraint.include, input)?),
            LetterField::Exclude => self.constraint.with_exclude(apply_edit(&self.constraint.exclude, input)?),
        };
        self.commit(candidate)
    }

    /// Clear pattern, include and exclude; back to page 0.
    pub fn reset(&mut self) {
        self.constraint.clear();
        self.page = 0;
        self.mode = Mode::Browsing;
        debug!("Reset constraint");
    }

    /// Render, force a pattern edit, then dispatch keys until quit.
    ///
    /// # Errors
    /// I/O failures from `io` are returned as-is.
    pub fn run<IO: SessionIo>(&mut self, io: &mut IO) -> io::Result<()> {
        self.render(io)?;
        self.handle_event(Event::EditPattern, io)?;

        while self.mode != Mode::Quit {
            self.render(io)?;
            let key = io.read_key()?;
            self.handle_event(Event::from(key), io)?;
        }

        Ok(())
    }

    /// Apply one event from `Browsing`. Editing events block on `io` for a line.
    ///
    /// # Errors
    /// I/O failures from `io`.
    pub fn handle_event<IO: LineSource + Renderer>(&mut self, event: Event, io: &mut IO) -> io::Result<()> {
        debug!("{event:?} in {:?}", self.mode);
        match event {
            Event::Next => self.move_page(Direction::Next)?,
            Event::Prev => self.move_page(Direction::Prev)?,
            Event::EditPattern => self.prompt_until_valid(Mode::EditingPattern, Prompt::Pattern, io, Self::set_pattern)?,
            Event::EditInclude => self.prompt_until_valid(Mode::EditingInclude, Prompt::Include, io, Self::edit_include)?,
            Event::EditExclude => self.prompt_until_valid(Mode::EditingExclude, Prompt::Exclude, io, Self::edit_exclude)?,
            Event::Reset => self.reset(),
            Event::Quit => self.mode = Mode::Quit,
            Event::Other => {}
        }
        Ok(())
    }

    fn render<R: Renderer>(&mut self, io: &mut R) -> io::Result<()> {
        let view = self.view()?;
        io.render(&view)
    }

    /// Ask for lines until `apply` accepts one, or the source cancels.
    fn prompt_until_valid<IO, F>(&mut self, mode: Mode, prompt: Prompt, io: &mut IO, apply: F) -> io::Result<()>
    where
        IO: LineSource + Renderer,
        F: Fn(&mut Self, &str) -> Result<(), ConstraintError>,
    {
        self.mode = mode;
        loop {
            let Some(line) = io.read_line(prompt)? else {
                debug!("{prompt:?} edit cancelled");
                break;
            };
            match apply(&mut *self, &line.to_lowercase()) {
                Ok(()) => break,
                Err(e) => {
                    warn!("Rejected {prompt:?} input {line:?}: {e}");
                    io.report_error(&e)?;
                }
            }
        }
        self.mode = Mode::Browsing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted I/O: replays lines and keys, records what was rendered.
    #[derive(Default)]
    struct Script {
        lines: VecDeque<Option<String>>,
        prompts: Vec<Prompt>,
        errors: Vec<&'static str>,
        renders: usize,
    }

    impl Script {
        fn with_lines(lines: &[Option<&str>]) -> Self {
            Script {
                lines: lines.iter().map(|l| l.map(str::to_string)).collect(),
                ..Script::default()
            }
        }
    }

    impl LineSource for Script {
        fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>> {
            self.prompts.push(prompt);
            self.lines.pop_front().ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script ran out of lines"))
        }
    }

    impl Renderer for Script {
        fn render(&mut self, _view: &SessionView<'_>) -> io::Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn report_error(&mut self, error: &ConstraintError) -> io::Result<()> {
            self.errors.push(error.code());
            Ok(())
        }
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["cat", "car", "can", "dog"])
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn set(s: &str) -> CharSet {
        s.chars().collect()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Event::from(Key::Right), Event::Next);
        assert_eq!(Event::from(Key::Left), Event::Prev);
        assert_eq!(Event::from(Key::Char('p')), Event::EditPattern);
        assert_eq!(Event::from(Key::Char('i')), Event::EditInclude);
        assert_eq!(Event::from(Key::Char('e')), Event::EditExclude);
        assert_eq!(Event::from(Key::Char('r')), Event::Reset);
        assert_eq!(Event::from(Key::Char('q')), Event::Quit);
        assert_eq!(Event::from(Key::Interrupt), Event::Quit);
        assert_eq!(Event::from(Key::Char('x')), Event::Other);
        assert_eq!(Event::from(Key::Char('P')), Event::Other);
        assert_eq!(Event::from(Key::Esc), Event::Other);
        assert_eq!(Event::from(Key::Enter), Event::Other);
    }

    #[test]
    fn test_new_session_is_empty() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        assert!(session.constraint().is_empty());
        assert_eq!(session.page(), 0);
        assert_eq!(session.mode(), Mode::Browsing);
        assert!(session.matches().unwrap().is_empty());
        assert_eq!(session.total_pages().unwrap(), 1);
    }

    #[test]
    fn test_edits_narrow_matches() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));

        session.set_pattern("ca.").unwrap();
        assert_eq!(&session.matches().unwrap()[..], ["can", "car", "cat"]);

        session.edit_include("r").unwrap();
        assert_eq!(&session.matches().unwrap()[..], ["car"]);

        session.edit_include("").unwrap();
        session.edit_exclude("r").unwrap();
        assert_eq!(&session.matches().unwrap()[..], ["can", "cat"]);
    }

    #[test]
    fn test_invalid_pattern_keeps_previous() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        session.set_pattern("ca.").unwrap();

        let err = session.set_pattern("ca(").unwrap_err();
        assert_eq!(err.code(), "E001");
        assert_eq!(session.constraint().pattern, "ca.");
    }

    #[test]
    fn test_invalid_edit_keeps_previous() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        session.edit_include("ab").unwrap();
        assert!(session.edit_include("1a").is_err());
        assert_eq!(session.constraint().include, set("ab"));
    }

    #[test]
    fn test_page_moves_saturate() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(1));
        session.set_pattern("...").unwrap();
        assert_eq!(session.total_pages().unwrap(), 4);

        session.move_page(Direction::Prev).unwrap();
        assert_eq!(session.page(), 0);
        for _ in 0..10 {
            session.move_page(Direction::Next).unwrap();
        }
        assert_eq!(session.page(), 3);
    }

    #[test]
    fn test_every_mutation_resets_page() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(1));
        session.set_pattern("...").unwrap();

        session.move_page(Direction::Next).unwrap();
        session.edit_include("+c").unwrap();
        assert_eq!(session.page(), 0);

        session.move_page(Direction::Next).unwrap();
        session.edit_exclude("t").unwrap();
        assert_eq!(session.page(), 0);

        session.move_page(Direction::Next).unwrap();
        session.set_pattern("c..").unwrap();
        assert_eq!(session.page(), 0);

        session.move_page(Direction::Next).unwrap();
        assert_eq!(session.page(), 1);
        session.reset();
        assert_eq!(session.page(), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        session.set_pattern("ca.").unwrap();
        session.edit_include("c").unwrap();
        session.edit_exclude("z").unwrap();

        session.reset();

        assert_eq!(session.constraint().pattern, "");
        assert!(session.constraint().include.is_empty());
        assert!(session.constraint().exclude.is_empty());
        assert_eq!(session.page(), 0);
        assert!(session.matches().unwrap().is_empty());
    }

    #[test]
    fn test_view_lists_current_page_with_global_indices() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(2));
        session.set_pattern("...").unwrap();
        session.move_page(Direction::Next).unwrap();

        let view = session.view().unwrap();
        let entries: Vec<_> = view.entries().collect();
        assert_eq!(entries, vec![PageEntry { index: 3, word: "cat" }, PageEntry { index: 4, word: "dog" }]);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.total_matches(), 4);
        assert_eq!(view.pattern, "...");
        assert_eq!(view.controls.len(), 7);
    }

    #[test]
    fn test_view_does_not_recompute() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        session.set_pattern("ca.").unwrap();
        let before = session.cache().recomputations();
        let _ = session.view().unwrap();
        let _ = session.view().unwrap();
        session.move_page(Direction::Next).unwrap();
        assert_eq!(session.cache().recomputations(), before);
    }

    #[test]
    fn test_pattern_prompt_retries_until_valid() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        let mut io = Script::with_lines(&[Some("ca("), Some("["), Some("CA.")]);

        session.handle_event(Event::EditPattern, &mut io).unwrap();

        assert_eq!(io.errors, vec!["E001", "E001"]);
        assert_eq!(io.prompts, vec![Prompt::Pattern; 3]);
        // line input is lower-cased
        assert_eq!(session.constraint().pattern, "ca.");
        assert_eq!(session.mode(), Mode::Browsing);
    }

    #[test]
    fn test_letter_prompt_retries_until_valid() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        let mut io = Script::with_lines(&[Some("a1"), Some("a+b"), Some("+ab")]);

        session.handle_event(Event::EditExclude, &mut io).unwrap();

        assert_eq!(io.errors, vec!["E003", "E004"]);
        assert_eq!(session.constraint().exclude, set("ab"));
    }

    #[test]
    fn test_cancel_keeps_constraint() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        session.set_pattern("ca.").unwrap();
        let mut io = Script::with_lines(&[Some("!!"), None]);

        session.handle_event(Event::EditInclude, &mut io).unwrap();

        assert_eq!(io.errors, vec!["E003"]);
        assert!(session.constraint().include.is_empty());
        assert_eq!(session.mode(), Mode::Browsing);
    }

    #[test]
    fn test_other_event_is_a_no_op() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(1));
        session.set_pattern("...").unwrap();
        session.move_page(Direction::Next).unwrap();
        let before = session.constraint().clone();
        let mut io = Script::default();

        session.handle_event(Event::Other, &mut io).unwrap();

        assert_eq!(session.constraint(), &before);
        assert_eq!(session.page(), 1);
        assert!(io.prompts.is_empty());
    }

    #[test]
    fn test_quit_event() {
        let dictionary = dictionary();
        let mut session = Session::new(&dictionary, size(10));
        let mut io = Script::default();
        session.handle_event(Event::Quit, &mut io).unwrap();
        assert_eq!(session.mode(), Mode::Quit);
    }
}
