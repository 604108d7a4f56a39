//! addondeck - Main entry point.
//!
//! Usage: addondeck [OPTIONS] [ROUTE]
//!
//! Options:
//!   --version, -v        Show version
//!   --help, -h           Show this help
//!   --config <path>      Use a config file other than ~/.addondeckrc
//!
//! ROUTE is the initial location hash, e.g.
//! `#/addons/<transportUrl>/<catalogId>/<type>`. Defaults to the
//! `start_route` setting.

use std::env;
use std::io;
use std::panic;
use std::path::PathBuf;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use addondeck::app::App;
use addondeck::config::Config;
use addondeck::logging;

/// Maximum iterations for main loop (safety bound).
const MAX_MAIN_ITERATIONS: usize = 10_000_000;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: addondeck [OPTIONS] [ROUTE]

Options:
  -v, --version        Show version
  -h, --help           Show this help
      --config <path>  Use a config file other than ~/.addondeckrc

ROUTE is the initial location hash (default: start_route, or #/addons).";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("addondeck v{}", VERSION);
        return Ok(());
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config_path: Option<PathBuf> = None;
    let mut route: Option<String> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let Some(path) = iter.next() else {
                eprintln!("--config requires a path\n\n{}", USAGE);
                std::process::exit(2);
            };
            config_path = Some(PathBuf::from(path));
        } else if arg.starts_with('-') {
            eprintln!("Unknown option: {}\n\n{}", arg, USAGE);
            std::process::exit(2);
        } else {
            route = Some(arg);
        }
    }

    // Configuration problems fall back to defaults
    let loaded = match &config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Err(e) = logging::init(&config.log_config) {
        eprintln!("Warning: file logging disabled: {}", e);
    }
    if let Some(e) = config_error {
        tracing::warn!(
            "[MAIN] Failed to load {}: {}; using defaults",
            config_path
                .unwrap_or_else(Config::default_config_path)
                .display(),
            e
        );
    }

    let initial_hash = route.unwrap_or_else(|| config.start_route.clone());

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, &initial_hash);

    // Main event loop
    let mut iterations = 0;
    let result = loop {
        if !app.is_running() || iterations >= MAX_MAIN_ITERATIONS {
            break Ok(());
        }

        if let Err(e) = terminal.draw(|frame| app.render(frame)) {
            break Err(e);
        }
        if let Err(e) = app.update() {
            break Err(e);
        }

        iterations += 1;
    };

    app.shutdown();
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!("[MAIN] Event loop failed: {}", e);
        return Err(e.into());
    }

    // Exit without waiting on an in-flight catalog request
    std::process::exit(0);
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
