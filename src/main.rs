use anyhow::Result;
use clap::Parser;

use commitcast::app::App;
use commitcast::cli::Cli;
use commitcast::config::Config;
use commitcast::styles::{self, ThemeType};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic so the terminal is
        // usable after a panic.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    // Log to a file; stdout belongs to the TUI.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join("commitcast");
    std::fs::create_dir_all(&log_dir)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "commitcast.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let theme_type = if cli.no_colors {
        ThemeType::NoColor
    } else {
        ThemeType::Dark
    };
    styles::init_theme(theme_type);

    let config = Config::resolve(cli.api_url, cli.language);

    let mut app = App::new(config)?;
    let result = app.run();

    drop(guard);

    result
}
