use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use livemark_config::Config;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

mod app;
mod batch;
mod ui;

use app::{App, Flow};

/// Longest wait for input before checking the debounce timer again.
const IDLE_POLL: Duration = Duration::from_millis(500);

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("livemark-cli", String::as_str);
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();

    match rest.as_slice() {
        ["render", path] => {
            init_logging();
            batch::render(Path::new(path))
        }
        ["roundtrip", path] => {
            init_logging();
            if !batch::roundtrip(Path::new(path))? {
                process::exit(1);
            }
            Ok(())
        }
        [path] if !path.starts_with('-') => edit(PathBuf::from(path)),
        _ => {
            eprintln!("Usage: {program} <file>");
            eprintln!("       {program} render <file>");
            eprintln!("       {program} roundtrip <file>");
            process::exit(1);
        }
    }
}

/// Only the batch commands log. The editor owns the terminal, and stderr
/// output would land on top of the alternate screen.
fn init_logging() {
    env_logger::Builder::from_default_env().init();
}

fn edit(path: PathBuf) -> Result<()> {
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config file: {}", Config::config_path().display());
            process::exit(1);
        }
    };
    let registry = config.theme.registry()?;
    let mut app = App::new(path, registry, config.editor.to_options())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app.editor.next_tick_in().map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        app.editor.tick();
    }
}
