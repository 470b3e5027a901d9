//! LazyLogbook - a terminal admin console for trainees and their logbooks.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use lazylogbook::config::{Config, Operator};
use lazylogbook::events::EventHandler;
use lazylogbook::logging;
use lazylogbook::models::User;
use lazylogbook::store::{DocumentStore, Environment};
use lazylogbook::tasks::{StoreMessage, TaskSpawner};
use lazylogbook::App;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Parser)]
#[command(name = "lazylogbook", version, about)]
struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON data file to open.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Which set of collections to work on.
    #[arg(long, value_enum)]
    env: Option<Environment>,

    /// Operate as this administrator, looked up in the data file.
    #[arg(long, value_name = "ID")]
    operator: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a starter configuration and create its operator account.
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: could not initialize logging: {e:#}");
    }

    let result = match cli.command {
        Some(Command::Init { force }) => init(cli.config.as_deref(), force),
        None => run(cli),
    };
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "Exiting with error");
    }
    logging::shutdown();
    result
}

fn config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path().context("could not determine the configuration path"),
    }
}

fn init(explicit: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config_path(explicit)?;
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let config = Config::starter();
    config
        .save_to(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote configuration to {}", path.display());

    if let (Some(operator), Some(data_file)) = (&config.operator, config.settings.data_file()) {
        let mut store = DocumentStore::open(&data_file, config.settings.environment)
            .with_context(|| format!("failed to open {}", data_file.display()))?;
        if store.user(&operator.id).is_err() {
            let mut account = User::new(operator.name.clone(), "", operator.role);
            account.id = operator.id.clone();
            store.commit(|store| store.upsert_user(&account))?;
            println!("Created operator account '{}' in {}", operator.id, data_file.display());
        }
    }

    if let Some(dir) = logging::log_directory() {
        println!("Logs are written to {}", dir.display());
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let path = config_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;

    if let Some(data) = cli.data {
        config.settings.data_file = Some(data);
    }
    if let Some(env) = cli.env {
        config.settings.environment = env;
    }

    let data_file = config
        .settings
        .data_file()
        .context("could not determine the data file location; pass --data")?;
    let store = DocumentStore::open(&data_file, config.settings.environment)
        .with_context(|| format!("failed to open {}", data_file.display()))?;

    if let Some(id) = &cli.operator {
        let user = store
            .user(id)
            .with_context(|| format!("operator '{id}' was not found in {}", data_file.display()))?;
        config.operator = Some(Operator::new(user.id, user.name, user.role));
    }

    config
        .validate()
        .context("invalid configuration; run 'lazylogbook init' to create one")?;
    let operator = config
        .operator
        .clone()
        .context("no operator configured")?;
    info!(operator = %operator.id, environment = %config.settings.environment, "Starting console");

    let (tx, rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(Arc::new(Mutex::new(store)), tx);
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);
    let app = App::new(operator, &config.settings);

    install_panic_hook();
    let mut terminal = setup_terminal().context("failed to set up the terminal")?;
    let result = run_app(&mut terminal, app, &spawner, rx, &events);
    restore_terminal().context("failed to restore the terminal")?;
    terminal.show_cursor()?;
    result
}

fn run_app(
    terminal: &mut Tui,
    mut app: App,
    spawner: &TaskSpawner,
    mut rx: mpsc::UnboundedReceiver<StoreMessage>,
    events: &EventHandler,
) -> anyhow::Result<()> {
    loop {
        for request in app.take_requests() {
            spawner.spawn(request);
        }

        terminal.draw(|frame| app.view(frame))?;

        // Polling blocks this thread only; store work runs on the blocking pool.
        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)
}

/// Put the terminal back before a panic message is printed.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}
