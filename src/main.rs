use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::PathBuf;

use fsmap::app::App;
use fsmap::config::Config;
use fsmap::config_io;
use fsmap::services::{log_dirs, terminal_modes, tracing_setup};

/// A terminal editor for a named file system mapping
#[derive(Parser, Debug)]
#[command(name = "fsmap")]
#[command(about = "Edit a named mapping of file system configurations", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: per-process file in the state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Show built-in file systems on start, overriding the config
    #[arg(long)]
    show_builtins: bool,

    /// Print the JSON schema of the config file and exit
    #[arg(long)]
    print_schema: bool,

    /// Print the directories used by fsmap and exit
    #[arg(long)]
    show_paths: bool,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.show_paths {
        log_dirs::print_all_paths();
        return Ok(());
    }

    if args.print_schema {
        let schema = Config::schema_json().context("Failed to generate config schema")?;
        println!("{}", schema);
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled, cannot write {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("fsmap starting");

    let mut config = config_io::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    if args.show_builtins {
        config.show_builtins = true;
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut modes =
        terminal_modes::TerminalModes::enable().context("Failed to set up the terminal")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")?;

    let mut app = App::new(config);
    let result = app.run(&mut terminal);

    modes.undo();
    tracing::info!("fsmap exiting");

    result.context("Terminal I/O failed")
}
