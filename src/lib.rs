pub mod cli;
pub mod config;
pub mod deps;
pub mod domain;
pub mod error;
pub mod index;
pub mod logging;
pub mod send;
pub mod ui;
pub mod verify;
pub mod writer;

pub use error::{AnnounceError, Result};
