//! markview - terminal viewer for diagnostics.
//!
//! Usage:
//!   markview markers.json                      # show all problems
//!   markview markers.json --root ~/src/app     # paths relative to the workspace
//!   markview markers.json --filter '!unused'   # hide problems mentioning "unused"
//!   markview markers.json --exclude '**/target/**' --hide-infos

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use markview::label::WorkspaceLabels;
use markview::provider::FileProvider;
use markview::table::MarkerTable;
use markview::tui::{App, ViewConfig};
use markview::view::RendererRegistry;

/// Terminal viewer for diagnostics.
#[derive(Parser)]
#[command(name = "markview", about = "Filterable problems table for diagnostics")]
struct Args {
    /// JSON markers file.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Workspace root; file labels are shown relative to it.
    /// Default: current directory.
    #[arg(long, value_name = "DIR", env = "MARKVIEW_ROOT")]
    root: Option<PathBuf>,

    /// Glob of files whose problems are never shown. Repeatable.
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Initial filter query.
    #[arg(long, value_name = "QUERY", default_value = "")]
    filter: String,

    /// Start with errors hidden.
    #[arg(long)]
    hide_errors: bool,

    /// Start with warnings hidden.
    #[arg(long)]
    hide_warnings: bool,

    /// Start with infos hidden.
    #[arg(long)]
    hide_infos: bool,

    /// Write logs to this file (the terminal is taken by the UI).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// UI tick in milliseconds; drives hover and file watching.
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    let provider = match FileProvider::open(&args.file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading markers from '{}': {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    let root = args.root.or_else(|| std::env::current_dir().ok());
    let table = MarkerTable::new(
        Box::new(WorkspaceLabels::new(root)),
        RendererRegistry::default(),
    );
    let config = ViewConfig {
        filter: args.filter,
        files_exclude: args.exclude,
        show_errors: !args.hide_errors,
        show_warnings: !args.hide_warnings,
        show_infos: !args.hide_infos,
    };

    let app = App::new(Box::new(provider), table, config);
    if let Err(e) = app.run(Duration::from_millis(args.tick_ms.max(10))) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Sends logs to `path`; `RUST_LOG` adds further directives.
fn init_logging(path: &Path, verbose: u8) -> std::io::Result<()> {
    let file = File::create(path)?;
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("markview={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
