//! # shoecart Entry Point
//!
//! ```text
//! $ shoecart add 1
//! $ shoecart update 1 3
//! $ shoecart --json show
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use clap::Parser;
use std::process::ExitCode;

use shoecart_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    shoecart_cli::run(Cli::parse()).await
}
