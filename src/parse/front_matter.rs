use crate::model::todo::TodoRecord;

/// Error type for front-matter parsing
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("no front matter: expected a leading and closing `---` line")]
    Missing,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a todo file into its raw YAML block and body.
///
/// The file must open with a `---` line and close the YAML block with a
/// `---` on its own line; anything else is [`FrontMatterError::Missing`].
/// The returned YAML keeps its trailing newline and the body is everything
/// after the closing line, verbatim.
pub fn split_front_matter(content: &str) -> Result<(&str, &str), FrontMatterError> {
    let rest = content.strip_prefix("---\n").ok_or(FrontMatterError::Missing)?;

    // Empty YAML block: the closing line follows immediately
    if let Some(body) = rest.strip_prefix("---\n") {
        return Ok(("", body));
    }
    if rest == "---" {
        return Ok(("", ""));
    }

    if let Some(idx) = rest.find("\n---\n") {
        return Ok((&rest[..idx + 1], &rest[idx + 5..]));
    }
    // Closing line ends the file without a trailing newline
    if let Some(yaml) = rest.strip_suffix("\n---") {
        return Ok((&rest[..yaml.len() + 1], ""));
    }

    Err(FrontMatterError::Missing)
}

/// Parse a todo file into its record and body.
pub fn parse_todo_file(content: &str) -> Result<(TodoRecord, String), FrontMatterError> {
    let (yaml, body) = split_front_matter(content)?;
    let record: TodoRecord = serde_yaml::from_str(yaml)?;
    Ok((record, body.to_string()))
}

/// Serialize a record and body back into the on-disk format:
/// `---\n<yaml>---\n<body>`.
pub fn serialize_todo_file(record: &TodoRecord, body: &str) -> Result<String, FrontMatterError> {
    let yaml = serde_yaml::to_string(record)?;
    Ok(format!("---\n{yaml}---\n{body}"))
}
