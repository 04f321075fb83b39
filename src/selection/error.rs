use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionErrorKind {
    /// A signal identifier that is not in the catalog. Indicates broken
    /// wiring between the catalog and its caller.
    InvalidSelectionKey,
    InvalidTicker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionError {
    pub kind: SelectionErrorKind,
    pub message: String,
}

impl SelectionError {
    pub fn new(kind: SelectionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SelectionError {}

pub fn invalid_selection_key(message: impl Into<String>) -> SelectionError {
    SelectionError::new(SelectionErrorKind::InvalidSelectionKey, message)
}

pub fn invalid_ticker(message: impl Into<String>) -> SelectionError {
    SelectionError::new(SelectionErrorKind::InvalidTicker, message)
}
