//! Binary entry point that glues the SQLite-backed workout log to the TUI:
//! resolve the data directory, open (or create) the store, merge the seed
//! exercises, and drive the Ratatui event loop until the user quits.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use gym_logger::config::AppPaths;
use gym_logger::{logging, run_app, App, Store, StoreError};

#[derive(Parser, Debug)]
#[command(name = "gym-logger")]
#[command(version)]
#[command(about = "Log exercises and sets from the terminal", long_about = None)]
struct Args {
    /// Directory holding data/, backups/ and the log file (default: ~/.gym-logger)
    #[arg(long, env = "GYM_LOGGER_HOME")]
    root: Option<PathBuf>,

    /// Profile whose store file (<profile>.sqlite3) should be used
    #[arg(short, long, env = "GYM_LOGGER_PROFILE")]
    profile: Option<String>,

    /// JSON file mapping exercise names to descriptions (default: data/exercises.json)
    #[arg(long)]
    seed: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_fatal(&err),
    }
}

/// Bring up persistence, hand it to the UI, and close the store on the way
/// out, even when the UI loop failed.
fn run(args: Args) -> Result<()> {
    let paths = AppPaths::resolve(args.root, args.profile, args.seed)?;
    paths.ensure_dirs()?;
    logging::init(&paths.log_file)?;
    log::info!("using data root {}", paths.root.display());

    let mut store = Store::open(&paths.store_location())?;
    store.seed_from_file(&paths.seed_file)?;

    let mut app = App::new(store, paths.backup_dir().to_path_buf());
    let ui_result = run_app(&mut app);
    let closed = app.into_store().shutdown();

    settle(ui_result, closed)
}

/// The UI failure wins over a close failure, which is still logged.
fn settle(ui_result: Result<()>, closed: Result<(), StoreError>) -> Result<()> {
    if let Err(err) = ui_result {
        if let Err(close_err) = &closed {
            log::error!("store did not close cleanly: {close_err}");
        }
        return Err(err);
    }
    closed?;
    Ok(())
}

/// Exit status for a failed run: 1 when a store error sits anywhere in the
/// chain, 2 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<StoreError>()) {
        1
    } else {
        2
    }
}

/// Anticipated store failures are reported plainly; anything else is logged
/// with its whole context chain.
fn report_fatal(err: &anyhow::Error) -> ExitCode {
    let status = exit_status(err);
    if status == 1 {
        log::error!("shutting down: {err:#}");
        eprintln!("Error - gym-logger was shut down!\n{err:#}");
    } else {
        log::error!("unexpected failure: {err:?}");
        eprintln!("Error - something unexpected went wrong!\n{err:?}");
    }
    ExitCode::from(status)
}
