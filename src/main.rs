//! Storefront procedure gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser
//!        │  form / query / JSON
//!        ▼
//!  ┌───────────┐    ┌───────────┐    ┌────────────┐    ┌──────────────┐
//!  │   http    │───▶│ storefront│───▶│  gateway   │───▶│      db      │
//!  │  server   │    │  / admin  │    │ bind, call │    │ bb8 tiberius │──▶ SQL Server
//!  └───────────┘    └─────┬─────┘    └────────────┘    └──────────────┘
//!        ▲                │
//!        │                ▼
//!        │          ┌───────────┐
//!        └──────────│   views   │  minijinja templates
//!                   └───────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Storefront over SQL Server stored procedures")]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match storefront::lifecycle::run(cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
