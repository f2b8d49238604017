//! `mechanic-shop` CLI entry-point.
//!
//! Usage: `mechanic-shop <database> <port> <user>`
//!
//! Connects to Postgres, runs the interactive main menu on this terminal
//! until the user exits, then disconnects.  Logs go to stderr and are
//! filtered with `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::StdConsole;
use db::{ConnectionConfig, PgStore};
use shop::{run_menu, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mechanic-shop",
    about = "Interactive client for the mechanic shop database",
    version
)]
struct Cli {
    /// Database name.
    database: String,
    /// Postgres port.
    port: u16,
    /// Database user.
    user: String,
    /// Database host.
    #[arg(long, default_value = "localhost")]
    host: String,
    /// Database password.
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    password: String,
}

impl Cli {
    fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            password: self.password.clone(),
            ..ConnectionConfig::local(&self.database, self.port, &self.user)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    // Wrong arity prints usage and exits before any connection attempt.
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error - {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.connection();
    println!("Connecting to database... {}", config.display_url());
    let pool = db::pool::connect(&config)
        .await
        .context("unable to connect to database; make sure Postgres is running")?;
    println!("Done");

    let store = PgStore::new(pool);
    let mut console = StdConsole::stdio();
    let menu = run_menu(&mut Session::new(&store, &mut console)).await;

    print!("Disconnecting from database...");
    db::pool::close(store.pool()).await;
    println!("Done\n\nBye !");

    let outcome = menu.context("console failure")?;
    info!(
        operations = outcome.operations,
        failures = outcome.failures,
        "session finished"
    );
    Ok(())
}
