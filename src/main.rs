mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::handlers::{self, Context};
use cli::Commands;
use cryptbreak::errors::CrackError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // Results go to stdout, logs to stderr
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

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        git = option_env!("GIT_HASH").unwrap_or("unknown"),
        "Starting cryptbreak"
    );

    let result = run(cli).await;

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(4),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.classify().exit_code);
        }
    }
}

async fn run(cli: cli::Cli) -> Result<handlers::Found, CrackError> {
    let ctx = Context::load(cli.config.as_deref(), cli.json).await?;
    match cli.command {
        Commands::Hash(args) => handlers::handle_hash(ctx, args).await,
        Commands::Cipher(args) => handlers::handle_cipher(ctx, args).await,
        Commands::Blocks(args) => handlers::handle_blocks(ctx, args).await,
        Commands::Lcg(args) => handlers::handle_lcg(ctx, args).await,
        Commands::Forge(args) => handlers::handle_forge(ctx, args).await,
        Commands::JwtCrack(args) => handlers::handle_jwt_crack(ctx, args).await,
        Commands::Decode(args) => handlers::handle_decode(ctx, args).await,
        Commands::Challenge(args) => handlers::handle_challenge(ctx, args).await,
        Commands::TimingDemo(args) => handlers::handle_timing_demo(ctx, args).await,
        Commands::Validate(args) => handlers::handle_validate(args).await,
    }
}
