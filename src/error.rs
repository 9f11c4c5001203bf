//! Fatal validation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    /// Two fields of one table or class share a name. Aborts the run before
    /// anything is written.
    #[error("duplicate field names in {owner}:\n{}", .duplicates.join("\n"))]
    DuplicateFields {
        /// e.g. `table gui` or `class vehicle`
        owner: String,
        /// Plain-text form of every offending field.
        duplicates: Vec<String>,
    },

    /// A table or class name that would place its page outside its output
    /// directory.
    #[error("{owner} cannot be used as a page name: names must not contain path separators")]
    InvalidPageName { owner: String },
}
