use std::path::{Path, PathBuf};

/// Runtime configuration, resolved once at startup and passed into the
/// store and the process adapters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding all open todo files
    pub todo_dir: PathBuf,
    /// Editor command for opening todo files
    pub editor: String,
    /// Shell launched by `todo cd`
    pub shell: String,
}

impl Config {
    /// Build a config from the environment: `TODO_DIR` (with `~` expansion),
    /// `EDITOR`, and `SHELL`, each with a fixed fallback.
    pub fn from_env() -> Self {
        Self::from_env_with_dir(None)
    }

    /// Like [`Config::from_env`], but a `-C` style override wins over
    /// `TODO_DIR`.
    pub fn from_env_with_dir(dir_override: Option<&Path>) -> Self {
        let todo_dir = match dir_override {
            Some(dir) => dir.to_path_buf(),
            None => default_todo_dir(),
        };
        Config {
            todo_dir,
            editor: env_or("EDITOR", "vi"),
            shell: env_or("SHELL", "sh"),
        }
    }

    /// Explicit construction for tests and embedding.
    pub fn new(todo_dir: PathBuf, editor: &str, shell: &str) -> Self {
        Config {
            todo_dir,
            editor: editor.to_string(),
            shell: shell.to_string(),
        }
    }
}

/// `TODO_DIR` if set and non-empty, else `$HOME/Documents/todo`.
fn default_todo_dir() -> PathBuf {
    match std::env::var("TODO_DIR") {
        Ok(dir) if !dir.is_empty() => expand_tilde(&dir),
        _ => dirs_home().join("Documents").join("todo"),
    }
}

/// Expand a leading `~` against `$HOME`. Returned verbatim when there is
/// nothing to expand.
fn expand_tilde(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix('~') {
        let home = std::env::var("HOME").unwrap_or_default();
        if !home.is_empty() {
            return PathBuf::from(home).join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(raw)
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

fn env_or(key: &str, fallback: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => fallback.to_string(),
    }
}
