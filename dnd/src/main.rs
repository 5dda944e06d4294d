//! D&D character sheet viewer.
//!
//! Composes a character sheet for the terminal and shows it in a scrollable
//! pager.
//!
//! # Headless Mode
//!
//! Run with `--print` to write the sheet as plain text instead:
//!
//! ```bash
//! cargo run -p dnd-sheet -- --character rando.json --width 200 --print
//! ```
//!
//! `--save FILE` writes the loaded character back out as a versioned save
//! file, which also normalizes a hand-written character file.

mod app;
mod config;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dnd_core::dice::{FixedRoller, RngRoller, Roller};
use dnd_core::persist::{load_character, save_character};
use dnd_core::sheet::{render_sheet, MIN_SHEET_WIDTH};
use dnd_core::testing::sample_wizard;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::ViewerConfig;
use events::{handle_event, EventResult};
use ui::render::render;
use ui::theme::SheetTheme;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match ViewerConfig::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if config.help {
        print_help();
        return Ok(());
    }

    let character = match &config.character_path {
        Some(path) => load_character(path).await?,
        None => {
            info!("no character file given, showing the sample wizard");
            sample_wizard()
        }
    };

    if let Some(path) = &config.save_path {
        save_character(path, &character).await?;
        info!(path = %path.display(), "saved character");
        return Ok(());
    }

    let mut roller: Box<dyn Roller> = match config.initiative {
        Some(d20) => Box::new(FixedRoller(d20)),
        None => Box::new(RngRoller::thread()),
    };

    // Headless: paint once and print
    if config.print {
        let width = config
            .width
            .or_else(|| terminal::size().ok().map(|(w, _)| w))
            .unwrap_or(MIN_SHEET_WIDTH);
        let tree = render_sheet(&character, width, &config.sheet, roller.as_mut());
        debug!(width = tree.width, height = tree.height, "printing sheet");
        headless::print_sheet(&tree, &SheetTheme::default(), &mut stdout().lock())?;
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let app = App::new(
        character,
        config.sheet,
        roller,
        config.width,
        (size.width, size.height),
    );

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dnd_sheet=warn,dnd_core=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }
    }
}

fn print_help() {
    println!("dnd-sheet - D&D 5e character sheet for the terminal");
    println!();
    println!("USAGE:");
    println!("  dnd-sheet [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help                Show this help message");
    println!("  -c, --character <FILE>    Character JSON file (default: sample wizard)");
    println!("  -w, --width <N>           Sheet width in columns (default: terminal width)");
    println!("  --initiative <N>          Use N as the initiative d20 instead of rolling");
    println!("  --player <NAME>           Player name shown in the header");
    println!("  --derive-proficiencies    Mark saving throws and skills from the character");
    println!("  --print                   Print the sheet as plain text and exit");
    println!("  --save <FILE>             Write the character as a versioned save and exit");
    println!();
    println!("ENVIRONMENT:");
    println!("  DND_SHEET_CHARACTER, DND_SHEET_WIDTH, DND_PLAYER_NAME");
    println!("  RUST_LOG                  Log filter (logs go to stderr)");
    println!();
    println!("KEYS:");
    println!("  j/k, Up/Down              Scroll one line");
    println!("  PgUp/PgDn, Ctrl+u/Ctrl+d  Scroll one page");
    println!("  g/G                       Top / bottom");
    println!("  h/l, Left/Right           Pan across a sheet wider than the terminal");
    println!("  r                         Re-roll initiative");
    println!("  q, Esc, Ctrl+c            Quit");
}
