pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notice;
pub mod toolchain;
pub mod ui;
pub mod version;

pub use error::{ChainedError, RegoError, Result};
