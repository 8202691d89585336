//! Command implementations for the CLI interface.
//!
//! Every command other than `completions` bootstraps the application first,
//! so a first run seeds the example tasks whichever command starts it.

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::{
    app::App,
    config::Config,
    error::AppError,
    render::print_view,
    storage::FileStorage,
    tui::run::run_tui,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface (default).
    Ui,

    /// Print the task list and the completed count.
    List,

    /// Add a new task. Blank name or tag is ignored.
    Add {
        /// Task name.
        name: String,
        /// Free-form tag.
        tag: String,
    },

    /// Mark a task completed by ID.
    Complete {
        /// Task ID.
        id: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn open(config: &Config) -> Result<App<FileStorage>, AppError> {
    let storage = FileStorage::open(&config.storage_path)?;
    Ok(App::bootstrap(storage)?)
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config) -> Result<(), AppError> {
    let storage = FileStorage::open(&config.storage_path)?;
    info!(storage = %storage.path().display(), "starting TUI");
    run_tui(storage)
}

/// Print the rendered list.
pub fn cmd_list(config: &Config) -> Result<(), AppError> {
    let app = open(config)?;
    print_view(app.view());
    Ok(())
}

/// Submit name and tag as the form would.
pub fn cmd_add(config: &Config, name: &str, tag: &str) -> Result<(), AppError> {
    let mut app = open(config)?;
    match app.submit_values(name, tag)? {
        Some(task) => println!("Tarefa {} adicionada: {} [{}]", task.id, task.name, task.tag),
        None => info!("blank name or tag, nothing added"),
    }
    print_view(app.view());
    Ok(())
}

/// Complete a task by id; an unknown id is reported but not an error.
pub fn cmd_complete(config: &Config, id: u64) -> Result<(), AppError> {
    let mut app = open(config)?;
    if app.complete(id)? {
        if let Some(task) = app.store().get(id) {
            println!("Tarefa {} concluída: {}", task.id, task.name);
        }
    } else {
        info!(id, "no task with this id");
        println!("Nenhuma tarefa com ID {id}.");
    }
    print_view(app.view());
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
