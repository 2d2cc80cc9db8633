pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod tally;

pub use context::{CoordinatorSettings, NotifierContext};
