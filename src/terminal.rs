//! Crossterm front end: reads keys and lines, draws the session.
//!
//! The screen is split into three ruled sections, top to bottom:
//! the clue (pattern / include / exclude), one page of matches, and the
//! control legend. Raw mode is on for the terminal's whole lifetime, so
//! every line is terminated with `\r\n`.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use wordling::errors::ConstraintError;
use wordling::session::{Control, Key, KeySource, LineSource, Prompt, Renderer, SessionView};

const NEWLINE: &str = "\r\n";
// Width of the "Pattern " style labels, so match indices line up under them.
const INDEX_WIDTH: usize = 6;
const LEGEND_COLUMN_WIDTH: usize = 32;

/// Blank rows needed after `shown` entries to fill a page, never more than
/// the screen is tall.
fn padding_rows(shown: usize, page_size: usize, height: usize) -> usize {
    page_size.min(height).saturating_sub(shown)
}

pub struct Terminal {
    out: Stdout,
    vertical_legend: bool,
}

impl Terminal {
    /// Switch to the alternate screen in raw mode. Restored on drop.
    pub fn new(vertical_legend: bool) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out, vertical_legend })
    }

    fn rule(&mut self, title: &str) -> io::Result<()> {
        let width = terminal::size().map_or(80, |(w, _)| usize::from(w));
        let label = format!(" {title} ");
        let fill = width.saturating_sub(label.chars().count());
        let left = "─".repeat(fill / 2);
        let right = "─".repeat(fill - fill / 2);
        queue!(
            self.out,
            Print(left),
            PrintStyledContent(label.bold().yellow()),
            Print(right),
            Print(NEWLINE)
        )
    }

    fn labelled(&mut self, label: &str, value: &str) -> io::Result<()> {
        queue!(
            self.out,
            PrintStyledContent(format!("{label:<11}").bold().cyan()),
            Print(value),
            Print(NEWLINE)
        )
    }

    fn control(&mut self, control: &Control) -> io::Result<()> {
        let text = format!(" {}", control.description);
        let pad = LEGEND_COLUMN_WIDTH.saturating_sub(control.key.chars().count() + text.chars().count());
        queue!(
            self.out,
            PrintStyledContent(control.key.bold().cyan()),
            Print(text),
            Print(" ".repeat(pad))
        )
    }

    /// The legend rows: three columns wide, or grouped by function.
    fn legend_rows(&self, controls: &'static [Control]) -> Vec<Vec<&'static Control>> {
        let pick = |indices: &[usize]| indices.iter().filter_map(|&i| controls.get(i)).collect::<Vec<_>>();
        if self.vertical_legend {
            vec![pick(&[0, 3, 5]), pick(&[1, 4, 6]), pick(&[2])]
        } else {
            vec![pick(&[0, 1, 2]), pick(&[3, 4]), pick(&[5, 6])]
        }
    }

    /// Read one key press, skipping releases and non-key events.
    fn next_key_event() -> io::Result<KeyEvent> {
        loop {
            if let TermEvent::Key(key) = event::read()? {
                // only presses; Windows also reports releases
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn to_key(key: KeyEvent) -> Key {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Key::Interrupt;
    }
    match key.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    }
}

impl KeySource for Terminal {
    fn read_key(&mut self) -> io::Result<Key> {
        Self::next_key_event().map(to_key)
    }
}

impl LineSource for Terminal {
    /// Minimal line editor: Enter accepts, Backspace deletes, Esc or Ctrl-C cancels.
    fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>> {
        self.rule("Prompt")?;
        queue!(self.out, Print(prompt.message()), Print(NEWLINE), PrintStyledContent(">> ".bold().magenta()), Show)?;
        self.out.flush()?;

        let mut line = String::new();
        let result = loop {
            let key = Self::next_key_event()?;
            match key.code {
                KeyCode::Enter => break Some(line),
                KeyCode::Esc => break None,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
                KeyCode::Char(c) => {
                    line.push(c);
                    execute!(self.out, Print(c))?;
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        execute!(self.out, Print("\u{8} \u{8}"))?;
                    }
                }
                _ => {}
            }
        };

        execute!(self.out, Hide, Print(NEWLINE))?;
        Ok(result)
    }
}

impl Renderer for Terminal {
    fn render(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        self.rule("Clue")?;
        self.labelled("Pattern", view.pattern)?;
        self.labelled("Include", &view.include.to_string())?;
        self.labelled("Exclude", &view.exclude.to_string())?;

        self.rule(&format!("Page {}/{}", view.page + 1, view.total_pages))?;
        let mut shown = 0;
        for entry in view.entries() {
            queue!(self.out, Print(format!("{:>INDEX_WIDTH$}.    {}", entry.index, entry.word)), Print(NEWLINE))?;
            shown += 1;
        }
        // keep the legend in place on short pages
        let height = terminal::size().map_or(24, |(_, h)| usize::from(h));
        for _ in 0..padding_rows(shown, view.page_size.get(), height) {
            queue!(self.out, Print(NEWLINE))?;
        }

        self.rule("Control")?;
        for row in self.legend_rows(view.controls) {
            for control in row {
                self.control(control)?;
            }
            queue!(self.out, Print(NEWLINE))?;
        }

        self.out.flush()
    }

    fn report_error(&mut self, error: &ConstraintError) -> io::Result<()> {
        for line in error.display_detailed().lines() {
            queue!(self.out, PrintStyledContent(line.red()), Print(NEWLINE))?;
        }
        self.out.flush()
    }
}
