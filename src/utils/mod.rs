//! Utilities shared by the command-line tool

pub mod logger;
pub mod progress;

pub use logger::Logger;
pub use progress::ProgressTracker;
