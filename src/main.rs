//! koiflow CLI - Sales order status workflow for the farm back office

use clap::Parser;
use koiflow::cli::{commands, Cli, Commands};
use koiflow::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> koiflow::Result<()> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Some(Commands::Workflow { json }) => commands::workflow::run(data_dir, json).await,
        Some(Commands::Show { id, json }) => commands::show::run(data_dir, &id, json).await,
        Some(Commands::Create { file, json }) => commands::create::run(data_dir, &file, json).await,
        Some(Commands::Status { id, target, json }) => {
            commands::status::run(data_dir, &id, target, json).await
        }
        Some(Commands::Edit { id, file, json }) => commands::edit::run(data_dir, &id, &file, json).await,
        Some(Commands::Slip { id, kind, json }) => commands::slip::run(data_dir, &id, kind, json).await,
        Some(Commands::Activity { member_id, json }) => {
            commands::activity::run(data_dir, &member_id, json).await
        }
        Some(Commands::Stock { id, file, json }) => commands::stock::run(data_dir, &id, &file, json).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
