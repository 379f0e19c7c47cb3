use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "todo",
    about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - markdown todos with front matter"),
    version,
    after_help = "Environment:\n  \
        TODO_DIR  Override the todo directory (default: ~/Documents/todo)\n  \
        EDITOR    Editor used to open todo files (default: vi)\n  \
        SHELL     Shell launched by `todo cd` (default: sh)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run against a different todo directory
    #[arg(short = 'C', long = "todo-dir")]
    pub todo_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a todo with fzf and open it in your editor
    List,
    /// Launch a subshell inside the todo directory
    Cd,
    /// Pick a todo, stamp it finished, and file it under done/<date>/
    Done,
    /// `todo <name>` opens (or creates) a todo;
    /// `todo <name> <project>` creates one under a project
    #[command(external_subcommand)]
    Open(Vec<String>),
}
