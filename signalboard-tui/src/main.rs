//! SignalBoard TUI — five-panel terminal dashboard over precomputed
//! trading signals.
//!
//! Panels:
//! 1. Overview — headline counts and BL posterior distribution
//! 2. Recommendations — the filtered, sortable signal grid
//! 3. Drilldown — per-ticker close chart with MA20/MA50
//! 4. Top Picks — best and worst BL-ranked tickers
//! 5. Ask — keyword queries against the loaded table
//!
//! Usage: signalboard-tui [recommendations.csv] [close_prices.csv]

mod app;
mod input;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use signalboard_core::DashboardContext;

use crate::app::App;

const DEFAULT_RECOMMENDATIONS: &str = "recommendations.csv";
const DEFAULT_PRICES: &str = "close_prices.csv";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths: positional overrides, CWD defaults otherwise.
    let mut args = std::env::args().skip(1);
    let rec_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_RECOMMENDATIONS.into()));
    let prices_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_PRICES.into()));

    // Load both datasets before touching the terminal so load failures
    // print as plain errors.
    let ctx = DashboardContext::load(&rec_path, &prices_path)
        .context("failed to load dashboard data")?;
    let mut app = App::new(ctx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
