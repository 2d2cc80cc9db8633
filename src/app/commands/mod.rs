pub mod handle;
pub mod output;
pub mod preview;
