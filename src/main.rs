use clap::Parser;
use tracing_subscriber::EnvFilter;

use credisource::cli::{self, commands::ValidateArgs, Cli, Commands, GlobalArgs};
use credisource::config;
use credisource::errors::CredisourceError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let globals = GlobalArgs::from(&cli);
    let result = match cli.command {
        Commands::Verify(command) => cli::verify::handle_verify(command, &globals).await,
        Commands::Job(args) => cli::job::handle_job(args, &globals).await,
        Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        let classification = e.classify();
        tracing::debug!(error_type = classification.error_type, "Command failed");
        if classification.user_facing {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("Error: {} (rerun with -v for details)", e);
        }
        std::process::exit(classification.exit_code);
    }
}

async fn handle_validate(args: ValidateArgs) -> Result<(), CredisourceError> {
    let path = std::path::PathBuf::from(&args.path);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.path);
    Ok(())
}
