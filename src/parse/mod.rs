pub mod front_matter;

pub use front_matter::{FrontMatterError, parse_todo_file, serialize_todo_file, split_front_matter};
