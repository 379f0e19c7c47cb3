use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

use crate::model::config::Config;
use crate::model::todo::TodoRecord;
use crate::parse::{FrontMatterError, parse_todo_file, serialize_todo_file};

/// Error type for todo store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not move {path} to {dest}: {source}")]
    Move {
        path: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },
    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Today's date in the `YYYY-MM-DD` form used throughout the store.
pub fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Make a title safe as a filename: `/` becomes `_`, NUL bytes are
/// stripped. Total and idempotent; everything else (spaces included)
/// passes through.
pub fn sanitize_title(title: &str) -> String {
    title.replace('/', "_").replace('\0', "")
}

/// Owns the todo directory: open todos as `*.md` files at the root,
/// completed ones under `done/<date>/`.
pub struct TodoStore {
    config: Config,
}

impl TodoStore {
    pub fn new(config: Config) -> Self {
        TodoStore { config }
    }

    /// The todo root directory.
    pub fn root(&self) -> &Path {
        &self.config.todo_dir
    }

    /// The path a todo with this name lives at (or would live at).
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.config
            .todo_dir
            .join(format!("{}.md", sanitize_title(name)))
    }

    /// Filenames of open todos, sorted. Non-recursive, so `done/` never
    /// shows up. A missing root reads as an empty listing.
    pub fn list_filenames(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.config.todo_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.config.todo_dir.clone(),
                    source: e,
                });
            }
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read and parse an open todo by filename.
    pub fn read(&self, filename: &str) -> Result<(TodoRecord, String), StoreError> {
        let path = self.config.todo_dir.join(filename);
        let content = fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        parse_todo_file(&content).map_err(|e| StoreError::FrontMatter { path, source: e })
    }

    /// Candidate lines for the rich listing: `title<TAB>created_at<TAB>
    /// project<TAB>filename`. Files whose front matter does not parse are
    /// skipped.
    pub fn list_records(&self) -> Result<Vec<String>, StoreError> {
        let mut lines = Vec::new();
        for filename in self.list_filenames()? {
            let Ok((record, _)) = self.read(&filename) else {
                continue;
            };
            lines.push(format!(
                "{}\t{}\t{}\t{}",
                record.title,
                record.created_at,
                record.project.as_deref().unwrap_or(""),
                filename
            ));
        }
        Ok(lines)
    }

    /// Create a new todo file with the placeholder body and return its path.
    /// Creates the todo root on first use.
    pub fn create(
        &self,
        title: &str,
        project: Option<&str>,
        today: &str,
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.config.todo_dir)?;

        let record = TodoRecord::new(title, project, today);
        let path = self.path_for(title);
        let content = serialize_todo_file(&record, "{}\n").map_err(|e| StoreError::FrontMatter {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, &content).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Stamp `finished_at = today` into the file's front matter, rewrite it
    /// in place, and move it under `done/<today>/`. Returns the new path.
    ///
    /// If the move fails after a successful rewrite the file stays in the
    /// root, completed in place; there is no rollback.
    pub fn complete(&self, filename: &str, today: &str) -> Result<PathBuf, StoreError> {
        let path = self.config.todo_dir.join(filename);
        let content = fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        let (mut record, body) =
            parse_todo_file(&content).map_err(|e| StoreError::FrontMatter {
                path: path.clone(),
                source: e,
            })?;

        record.finished_at = Some(today.to_string());
        let updated =
            serialize_todo_file(&record, &body).map_err(|e| StoreError::FrontMatter {
                path: path.clone(),
                source: e,
            })?;
        atomic_write(&path, updated.as_bytes()).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;

        let dest_dir = self.config.todo_dir.join("done").join(today);
        fs::create_dir_all(&dest_dir)?;
        let dest = dest_dir.join(filename);
        fs::rename(&path, &dest).map_err(|e| StoreError::Move {
            path,
            dest: dest.clone(),
            source: e,
        })?;
        Ok(dest)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
