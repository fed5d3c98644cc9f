//! # shoecart CLI Library
//!
//! Terminal front end for the cart store.
//!
//! ## Module Organization
//! ```text
//! shoecart_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state.rs        ◄─── AppContext: database, stock client, CartStore
//! ├── commands/
//! │   ├── cart.rs     ◄─── show, add, remove, update
//! │   └── config.rs   ◄─── Effective configuration
//! ├── output.rs       ◄─── Table and JSON rendering
//! └── error.rs        ◄─── CliError (startup) and ApiError (commands)
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::cart::{self as cart_commands, CartResponse};
use error::{ApiError, CliResult};
use output::CommandOutput;
use shoecart_store::StoreConfig;
use state::AppContext;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       CLI Startup                                       │
/// │                                                                         │
/// │  1. Initialize Logging (stderr, RUST_LOG overrides)                     │
/// │  2. Load StoreConfig (file → environment → validate)                    │
/// │  3. Open SQLite database, run migrations                                │
/// │  4. Build CartStore (loads the persisted cart)                          │
/// │  5. Run the command, print cart and notifications                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Only startup failures exit non-zero; a rejected cart command is reported
/// as a notification.
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "shoecart failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> CliResult<()> {
    let config = StoreConfig::load(cli.config.clone())?;

    if cli.command == Command::Config {
        print!("{}", commands::config::get_config(&config)?);
        return Ok(());
    }

    info!("Starting shoecart");
    let mut ctx = AppContext::open(&config, cli.catalog.as_deref()).await?;

    let result: Result<CartResponse, ApiError> = match cli.command {
        Command::Show => Ok(cart_commands::get_cart(&ctx.store).await),
        Command::Add { product_id } => cart_commands::add_to_cart(&ctx.store, product_id).await,
        Command::Remove { product_id } => {
            cart_commands::remove_from_cart(&ctx.store, product_id).await
        }
        Command::Update { product_id, amount } => {
            cart_commands::update_cart_item(&ctx.store, product_id, amount).await
        }
        Command::Config => return Ok(()),
    };

    let (cart, error) = match result {
        Ok(cart) => (cart, None),
        Err(e) => (cart_commands::get_cart(&ctx.store).await, Some(e)),
    };
    let notifications = ctx.drain_notices();

    let rendered = if cli.json {
        output::render_json(&CommandOutput {
            cart,
            error,
            notifications,
        })
    } else {
        for notice in &notifications {
            eprintln!("✖ {notice}");
        }
        Ok(output::render_table(&cart, ctx.locale()))
    };

    // The pool is closed whether or not rendering succeeded.
    ctx.close().await;
    print!("{}", rendered?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shoecart=trace` - Show trace for shoecart crates only
/// - Default: `info,shoecart=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shoecart=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
