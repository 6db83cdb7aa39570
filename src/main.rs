use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::Parser;

use wordling::dictionary::Dictionary;
use wordling::pagination::DEFAULT_PAGE_SIZE;
use wordling::session::Session;

mod terminal;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Narrow a word list by regex shape and required/forbidden letters
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Path to the word list (one word per line, or word;score)
    #[arg(short, long, default_value = "/usr/share/dict/words")]
    dictionary: String,

    /// Minimum score for word;score lines
    #[arg(short = 'm', long, default_value_t = 50)]
    min_score: i32,

    /// Number of matches per page
    #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: NonZeroUsize,

    /// Lay the control legend out in columns
    #[arg(long)]
    vertical_legend: bool,
}

/// Entry point of the Wordling CLI.
///
/// Delegates to [`try_main`], printing any error before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("WORDLING_DEBUG").is_ok();
    wordling::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the dictionary, then hand the terminal to an interactive session.
///
/// Returns an error if the dictionary cannot be read or the terminal fails;
/// it bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let dictionary = Dictionary::load_from_path(&cli.dictionary, cli.min_score)?;
    if dictionary.is_empty() {
        log::warn!("Dictionary '{}' has no usable words", cli.dictionary);
    }
    log::info!("Loaded {} words", dictionary.len());

    let mut session = Session::new(&dictionary, cli.page_size);
    // the terminal is restored when it drops, before any error is printed
    {
        let mut terminal = terminal::Terminal::new(cli.vertical_legend)?;
        session.run(&mut terminal)?;
    }

    Ok(())
}
