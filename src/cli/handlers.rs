use std::path::Path;

use crate::cli::commands::{Cli, Commands};
use crate::io::external::{Editor, EditorCmd, Fzf, Selector, spawn_subshell};
use crate::io::store::{TodoStore, today_str};
use crate::model::config::Config;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env_with_dir(cli.todo_dir.as_deref().map(Path::new));
    let selector = Fzf::new(config.todo_dir.clone());
    let editor = EditorCmd::new(&config.editor);
    let shell = config.shell.clone();
    let store = TodoStore::new(config);

    match cli.command {
        // No subcommand → usage, handled in main.rs
        None => Ok(()),
        Some(Commands::List) => cmd_list(&store, &selector, &editor),
        Some(Commands::Cd) => {
            spawn_subshell(&shell, store.root());
            Ok(())
        }
        Some(Commands::Done) => cmd_done(&store, &selector),
        Some(Commands::Open(args)) => cmd_open_or_create(&store, &editor, &args),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// `todo list` — rich candidate lines through the selector, then edit the
/// chosen file. No candidates or no selection is a quiet no-op.
fn cmd_list(
    store: &TodoStore,
    selector: &dyn Selector,
    editor: &dyn Editor,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = store.list_records()?;
    if candidates.is_empty() {
        return Ok(());
    }
    let Some(selected) = selector.select(&candidates) else {
        return Ok(());
    };
    // The filename is the last tab-joined field
    let filename = selected.rsplit('\t').next().unwrap_or(&selected);
    editor.edit(&store.root().join(filename));
    Ok(())
}

/// `todo done` — bare filenames through the selector, then complete the
/// chosen todo.
fn cmd_done(store: &TodoStore, selector: &dyn Selector) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = store.list_filenames()?;
    if candidates.is_empty() {
        return Ok(());
    }
    let Some(filename) = selector.select(&candidates) else {
        return Ok(());
    };
    store.complete(&filename, &today_str())?;
    Ok(())
}

/// `todo <name>` / `todo <name> <project>` — open an existing todo, or
/// create it (and open it) when it doesn't exist yet.
fn cmd_open_or_create(
    store: &TodoStore,
    editor: &dyn Editor,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    match args {
        [name] => {
            let path = store.path_for(name);
            if !path.exists() {
                store.create(name, None, &today_str())?;
            }
            editor.edit(&path);
            Ok(())
        }
        [name, project] => {
            let path = store.create(name, Some(project.as_str()), &today_str())?;
            editor.edit(&path);
            Ok(())
        }
        _ => Err(format!(
            "expected NAME or NAME PROJECT, got {} arguments (try `todo --help`)",
            args.len()
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use crate::parse::parse_todo_file;

    /// Selector that always returns a fixed choice (or nothing), recording
    /// the candidates it was offered.
    struct ScriptedSelector {
        choice: Option<String>,
        offered: RefCell<Vec<String>>,
    }

    impl ScriptedSelector {
        fn new(choice: Option<&str>) -> Self {
            ScriptedSelector {
                choice: choice.map(str::to_string),
                offered: RefCell::new(Vec::new()),
            }
        }
    }

    impl Selector for ScriptedSelector {
        fn select(&self, candidates: &[String]) -> Option<String> {
            *self.offered.borrow_mut() = candidates.to_vec();
            self.choice.clone()
        }
    }

    /// Editor that records the paths it was asked to open.
    struct RecordingEditor {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl RecordingEditor {
        fn new() -> Self {
            RecordingEditor {
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl Editor for RecordingEditor {
        fn edit(&self, path: &Path) {
            self.opened.borrow_mut().push(path.to_path_buf());
        }
    }

    fn store_in(tmp: &TempDir) -> TodoStore {
        TodoStore::new(Config::new(tmp.path().to_path_buf(), "vi", "sh"))
    }

    #[test]
    fn test_list_opens_selected_filename_field() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.create("buy milk", Some("home"), "2025-06-01").unwrap();

        let selector = ScriptedSelector::new(Some("buy milk\t2025-06-01\thome\tbuy milk.md"));
        let editor = RecordingEditor::new();
        cmd_list(&store, &selector, &editor).unwrap();

        assert_eq!(
            *selector.offered.borrow(),
            ["buy milk\t2025-06-01\thome\tbuy milk.md"]
        );
        assert_eq!(*editor.opened.borrow(), [tmp.path().join("buy milk.md")]);
    }

    #[test]
    fn test_list_no_selection_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.create("buy milk", None, "2025-06-01").unwrap();

        let selector = ScriptedSelector::new(None);
        let editor = RecordingEditor::new();
        cmd_list(&store, &selector, &editor).unwrap();
        assert!(editor.opened.borrow().is_empty());
    }

    #[test]
    fn test_list_empty_dir_skips_selector() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let selector = ScriptedSelector::new(Some("anything"));
        let editor = RecordingEditor::new();
        cmd_list(&store, &selector, &editor).unwrap();
        // Selector never ran: no candidates were recorded
        assert!(selector.offered.borrow().is_empty());
        assert!(editor.opened.borrow().is_empty());
    }

    #[test]
    fn test_done_completes_selection() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.create("buy milk", None, "2025-06-01").unwrap();

        let selector = ScriptedSelector::new(Some("buy milk.md"));
        cmd_done(&store, &selector).unwrap();

        assert_eq!(*selector.offered.borrow(), ["buy milk.md"]);
        assert!(!tmp.path().join("buy milk.md").exists());
        let today = today_str();
        let moved = tmp.path().join("done").join(&today).join("buy milk.md");
        let (record, _) = parse_todo_file(&fs::read_to_string(&moved).unwrap()).unwrap();
        assert_eq!(record.finished_at, Some(today));
    }

    #[test]
    fn test_done_no_selection_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.create("buy milk", None, "2025-06-01").unwrap();

        let selector = ScriptedSelector::new(None);
        cmd_done(&store, &selector).unwrap();
        assert!(tmp.path().join("buy milk.md").exists());
    }

    #[test]
    fn test_open_creates_missing_todo() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let editor = RecordingEditor::new();

        cmd_open_or_create(&store, &editor, &["errands".to_string()]).unwrap();

        let path = tmp.path().join("errands.md");
        assert!(path.exists());
        let (record, body) = parse_todo_file(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(record.title, "errands");
        assert_eq!(record.created_at, today_str());
        assert_eq!(record.project, None);
        assert_eq!(body, "{}\n");
        assert_eq!(*editor.opened.borrow(), [path]);
    }

    #[test]
    fn test_open_existing_leaves_file_alone() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.create("errands", Some("home"), "2025-06-01").unwrap();
        let before = fs::read_to_string(tmp.path().join("errands.md")).unwrap();

        let editor = RecordingEditor::new();
        cmd_open_or_create(&store, &editor, &["errands".to_string()]).unwrap();

        let after = fs::read_to_string(tmp.path().join("errands.md")).unwrap();
        assert_eq!(after, before);
        assert_eq!(editor.opened.borrow().len(), 1);
    }

    #[test]
    fn test_open_with_project() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let editor = RecordingEditor::new();

        cmd_open_or_create(
            &store,
            &editor,
            &["buy milk".to_string(), "home".to_string()],
        )
        .unwrap();

        let (record, _) =
            parse_todo_file(&fs::read_to_string(tmp.path().join("buy milk.md")).unwrap()).unwrap();
        assert_eq!(record.project.as_deref(), Some("home"));
    }

    #[test]
    fn test_too_many_args_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let editor = RecordingEditor::new();

        let args: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert!(cmd_open_or_create(&store, &editor, &args).is_err());
        assert!(editor.opened.borrow().is_empty());
    }
}
