pub mod analysis;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod logging;
pub mod selection;
