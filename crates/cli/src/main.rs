//! CampusChat CLI, the main entry point.
//!
//! Commands:
//! - `serve`  Start the HTTP chat endpoint
//! - `ask`    Route a single message and print the reply
//! - `rules`  List the static rule table

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "campuschat",
    about = "CampusChat: university information chat endpoint",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP chat endpoint
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer one message the way the endpoint would
    Ask {
        /// The message to route
        message: String,
    },

    /// List the rule table in precedence order
    Rules,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(host, port).await?,
        Commands::Ask { message } => commands::ask::run(&message).await?,
        Commands::Rules => commands::rules::run(),
    }

    Ok(())
}
