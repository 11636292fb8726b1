//! Failure reasons for commands and direct-manipulation operations.
//!
//! None of these ever reach the host: the runtime absorbs every failure as
//! a silent no-op (stale paths are an expected race, not a bug). They exist
//! so internal code paths stay explicit `Result`s and so the diagnostic log
//! can say why nothing happened.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandFailure {
    #[error("path does not resolve")]
    StalePath,

    #[error("element has no parent")]
    NoParent,

    #[error("no sibling in that direction")]
    NoSibling,

    #[error("fragment parsed to no element")]
    EmptyFragment,

    #[error("element is not an image")]
    NotAnImage,

    #[error("operation requires a selected element")]
    NothingSelected,
}
