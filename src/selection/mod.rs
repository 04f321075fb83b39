pub mod error;
pub mod store;

pub use error::{SelectionError, SelectionErrorKind};
pub use store::{Selection, SelectionKind, SelectionStore, Ticker};
