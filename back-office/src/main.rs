use anyhow::Context;
use back_office::console::{self, Cli};
use back_office::{Config, DbService, init_logger_with_file};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1. Environment (.env) and arguments
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 2. Configuration and logging
    let config = Config::from_env().with_overrides(cli.database_url, cli.log_level);
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )
    .context("Failed to initialize logging")?;
    tracing::debug!(environment = %config.environment, "Back office starting");

    // 3. Database
    let db = match DbService::new(&config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{}", console::user_message(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    // 4. Run the command
    let outcome = console::execute(&db.pool, cli.command).await;
    db.close().await;

    match outcome {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(code = %e.code, error = %e, "Command failed");
            eprintln!("{}", console::user_message(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
