//! Process setup and the input loop.
//!
//! The API lives behind an `Arc<Mutex<…>>` shared with the signal handler, so
//! Ctrl+C (or SIGTERM/SIGHUP) saves before the process ends. A command holds
//! that lock while it waits for a y/n answer, so after every finished command
//! the books are also copied into a [`Checkpoint`] the handler can always
//! reach. A panic inside the loop is caught so the regular save still runs.

use super::render::render_result;
use super::setup::{Cli, HOME_ENV};
use clap::Parser;
use colored::Colorize;
use deskmate::api::AssistantApi;
use deskmate::book::AddressBook;
use deskmate::commands::{AssumeYes, CmdResult, Confirm, Session, Settings};
use deskmate::config::AssistantConfig;
use deskmate::error::{AssistantError, Result};
use deskmate::notebook::NoteBook;
use deskmate::store::fs::FileStore;
use deskmate::store::DataStore;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

#[derive(Clone)]
struct AppContext {
    api: Arc<Mutex<AssistantApi<FileStore>>>,
    checkpoint: Arc<Mutex<Checkpoint>>,
}

/// The books as of the last finished command, with a store of their own.
struct Checkpoint {
    store: FileStore,
    book: AddressBook,
    notebook: NoteBook,
}

impl Checkpoint {
    fn new(store: FileStore, session: &Session) -> Self {
        Self {
            store,
            book: session.book.clone(),
            notebook: session.notebook.clone(),
        }
    }

    fn update(&mut self, session: &Session) {
        self.book.clone_from(&session.book);
        self.notebook.clone_from(&session.notebook);
    }

    fn save(&mut self) -> Result<()> {
        let contacts = self.store.save_contacts(&self.book);
        let notes = self.store.save_notes(&self.notebook);
        contacts.and(notes)
    }
}

/// Exit status after a signal, as shells report an interrupted command.
const SIGNAL_EXIT: i32 = 130;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color || !console::Term::stdout().is_term() {
        colored::control::set_override(false);
    }

    let ctx = init_context(&cli)?;
    install_signal_handler(ctx.clone());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if cli.command.is_empty() {
            interactive(&ctx, cli.yes)
        } else {
            one_shot(&ctx, &cli.command, cli.yes)
        }
    }));

    save_and_report(&mut lock(&ctx.api));

    match outcome {
        Ok(result) => result,
        Err(_) => Err(AssistantError::Store(
            "the session stopped unexpectedly; data saved".to_string(),
        )),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "deskmate=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    log::info!("data directory: {}", data_dir.display());

    let config = AssistantConfig::load(&data_dir).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config: {}", e);
        AssistantConfig::default()
    });
    let store = FileStore::new(data_dir).with_config(&config);
    let api = AssistantApi::open(store.clone(), Settings::from(&config))?;
    let checkpoint = Checkpoint::new(store, api.session());
    Ok(AppContext {
        api: Arc::new(Mutex::new(api)),
        checkpoint: Arc::new(Mutex::new(checkpoint)),
    })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "deskmate", "deskmate")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            AssistantError::Store(format!(
                "cannot determine a data directory; pass --data-dir or set {}",
                HOME_ENV
            ))
        })
}

/// A poisoned lock still holds usable books; the panic is reported elsewhere.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs a command under the API lock and checkpoints the books it leaves.
fn execute<F>(ctx: &AppContext, run: F) -> CmdResult
where
    F: FnOnce(&mut AssistantApi<FileStore>) -> CmdResult,
{
    let mut api = lock(&ctx.api);
    let result = run(&mut api);
    lock(&ctx.checkpoint).update(api.session());
    result
}

fn save_and_report(api: &mut AssistantApi<FileStore>) {
    let outcome = api.save();
    report_save(outcome, api.store().root());
}

fn report_save(outcome: Result<()>, root: &Path) {
    match outcome {
        Ok(()) => log::info!("saved to {}", root.display()),
        Err(e) => {
            log::error!("save failed: {}", e);
            eprintln!("{}", format!("Could not save your data: {}", e).red());
        }
    }
}

fn install_signal_handler(ctx: AppContext) {
    let installed = ctrlc::set_handler(move || {
        log::info!("signal received, saving");
        println!();
        match ctx.api.try_lock() {
            Ok(mut api) => save_and_report(&mut api),
            Err(TryLockError::Poisoned(poisoned)) => save_and_report(&mut poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                log::info!("a command is still running; saving the last checkpoint");
                let mut checkpoint = lock(&ctx.checkpoint);
                let outcome = checkpoint.save();
                report_save(outcome, checkpoint.store.root());
            }
        }
        std::process::exit(SIGNAL_EXIT);
    });
    if let Err(e) = installed {
        log::warn!("cannot install signal handler: {}", e);
    }
}

fn interactive(ctx: &AppContext, assume_yes: bool) -> Result<()> {
    println!("{}", "Welcome to the assistant bot!".bold());
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("Enter a command: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let result = execute(ctx, |api| {
            if assume_yes {
                api.execute_line(&line, &mut AssumeYes)
            } else {
                api.execute_line(&line, &mut Prompt { input: &mut input })
            }
        });
        render_result(&result);
        if result.exit {
            break;
        }
    }
    Ok(())
}

fn one_shot(ctx: &AppContext, command: &[String], assume_yes: bool) -> Result<()> {
    let (name, args) = match command.split_first() {
        Some(parts) => parts,
        None => return Ok(()),
    };

    let result = execute(ctx, |api| {
        if assume_yes {
            api.execute(name, args, &mut AssumeYes)
        } else {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            api.execute(name, args, &mut Prompt { input: &mut input })
        }
    });
    render_result(&result);
    Ok(())
}

/// Asks on stdout and reads the answer from the session's input. End of input
/// counts as no.
struct Prompt<'a, R: BufRead> {
    input: &'a mut R,
}

impl<R: BufRead> Confirm for Prompt<'_, R> {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} (y/n): ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
