//! CLI subcommands

pub mod filter;
pub mod generate;
pub mod init;
pub mod validate;
