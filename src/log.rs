use log::LevelFilter;

/// Initialize logging for Wordling.
///
/// # Behavior
/// - `Debug` level if `debug_enabled` is true, otherwise `Warn` (the terminal
///   front end owns the screen, so routine `Info` chatter stays quiet).
/// - `RUST_LOG` overrides both when set.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // a second init (e.g. from tests) is harmless
    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}
