//! CLI subcommands.

pub mod bearing;
pub mod common;
pub mod init;
pub mod landmarks;
pub mod simulate;
