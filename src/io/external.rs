use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Interactive picker over candidate lines.
///
/// `None` means "nothing selected" — the user aborted, nothing matched, or
/// the selector failed to run. Callers treat all three the same.
pub trait Selector {
    fn select(&self, candidates: &[String]) -> Option<String>;
}

/// Opens a file for the user to edit. Best-effort: launch failures and the
/// editor's exit status are ignored.
pub trait Editor {
    fn edit(&self, path: &Path);
}

/// fzf run from inside the todo root, with a preview of the candidate file.
///
/// Candidate lines may be bare filenames or tab-joined records whose last
/// field is the filename; `{-1}` previews the right file either way.
pub struct Fzf {
    todo_dir: PathBuf,
}

impl Fzf {
    pub fn new(todo_dir: PathBuf) -> Self {
        Fzf { todo_dir }
    }
}

impl Selector for Fzf {
    fn select(&self, candidates: &[String]) -> Option<String> {
        let mut child = Command::new("fzf")
            .arg("--delimiter")
            .arg("\t")
            .arg("--preview")
            .arg("sed -n '1,200p' {-1}")
            .current_dir(&self.todo_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // stderr stays on the terminal so fzf can draw its UI
            .spawn()
            .ok()?;

        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(candidates.join("\n").as_bytes());
        }

        let output = child.wait_with_output().ok()?;
        if !output.status.success() {
            return None;
        }
        let selected = String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_string();
        if selected.is_empty() { None } else { Some(selected) }
    }
}

/// The user's `$EDITOR`, inheriting the controlling terminal.
pub struct EditorCmd {
    editor: String,
}

impl EditorCmd {
    pub fn new(editor: &str) -> Self {
        EditorCmd {
            editor: editor.to_string(),
        }
    }
}

impl Editor for EditorCmd {
    fn edit(&self, path: &Path) {
        let _ = Command::new(&self.editor).arg(path).status();
    }
}

/// Drop the user into a subshell rooted at `dir`. Best-effort.
pub fn spawn_subshell(shell: &str, dir: &Path) {
    let _ = Command::new(shell).current_dir(dir).status();
}
