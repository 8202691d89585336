//! # tarefas - a minimal local task list
//!
//! Add a task with a name and a tag, see the list, mark tasks done. State is
//! kept in a small key-value file so it survives between runs.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive screen (the default command)
//! tarefas
//!
//! # Add a task from the shell
//! tarefas add "Write spec" docs
//!
//! # List tasks and the completed count
//! tarefas list
//!
//! # Complete task 4
//! tarefas complete 4
//! ```
//!
//! On first run, with nothing stored yet, three example tasks are created and
//! the last one is already completed.
//!
//! Data is stored in `~/.tarefas/storage.json` unless `--storage` or
//! `TAREFAS_STORAGE` points elsewhere. The file holds two keys: `tasks`, the
//! JSON array of tasks, and `taskIdCounter`, the next id.

use clap::Parser;

pub mod app;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod form;
pub mod input;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod run;
}

use cli::{init_file_tracing, init_tracing, Cli};
use cmd::*;
use config::Config;
use error::AppError;

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Ui => {
            let config = Config::resolve(cli.storage)?;
            init_file_tracing(cli.verbose, &config.log_path())?;
            cmd_ui(&config)
        }
        Commands::List => {
            init_tracing(cli.verbose);
            cmd_list(&Config::resolve(cli.storage)?)
        }
        Commands::Add { name, tag } => {
            init_tracing(cli.verbose);
            cmd_add(&Config::resolve(cli.storage)?, &name, &tag)
        }
        Commands::Complete { id } => {
            init_tracing(cli.verbose);
            cmd_complete(&Config::resolve(cli.storage)?, id)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
