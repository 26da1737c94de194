use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use assetdeck::access::AccessLevel;
use assetdeck::config::LibraryConfig;
use assetdeck::ingest::build_index;
use assetdeck::interact::{Controller, SystemClipboard};
use assetdeck::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use assetdeck::render::{self, UiSnapshot};

/// Terminal asset browser over a flat folder/file library config.
#[derive(Debug, Parser)]
#[command(name = "assetdeck", version)]
struct Cli {
    /// Path to the library config JSON
    library: PathBuf,

    /// Bypass the access gate (design/preview mode)
    #[arg(long)]
    design: bool,

    /// Grant admin access regardless of the config's descriptor
    #[arg(long)]
    admin: bool,

    /// Extra role tags to merge into the config's descriptor (repeatable)
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Write tracing output to this file (stderr belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: Option<&PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = LibraryConfig::load(&cli.library)?;
    config.access.admin |= cli.admin;
    config.access.roles.extend(cli.roles.iter().cloned());
    let access = AccessLevel::evaluate(&config.access, cli.design || config.design_mode);

    let index = build_index(&config);
    let title = config.title.clone().unwrap_or_else(|| "Asset Library".to_string());

    let prefs: Box<dyn PreferenceStore> = match FilePreferences::open_default() {
        Some(store) => Box::new(store),
        None => Box::new(MemoryPreferences::default()),
    };
    let controller = Controller::new(&index, prefs, Box::new(SystemClipboard));

    enable_raw_mode()?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let app_result = run_app(&mut terminal, &index, controller, access, &title);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app_result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    index: &assetdeck::TreeIndex,
    mut controller: Controller,
    access: AccessLevel,
    title: &str,
) -> anyhow::Result<()> {
    let mut regions = Vec::new();

    loop {
        terminal.draw(|frame| {
            let snapshot = UiSnapshot {
                index,
                view: &controller.view,
                overlays: &controller.overlays,
                access,
                title,
                search_input: &controller.search_input,
                search_focused: controller.search_focused,
                cursor: controller.cursor(),
            };
            regions = render::draw(frame, &snapshot);
        })?;

        if controller.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => controller.handle_key(index, key),
                Event::Mouse(mouse) => controller.handle_mouse(index, mouse, &regions),
                Event::Resize(_, _) => {}
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }

        controller.tick(Instant::now());
    }

    Ok(())
}
