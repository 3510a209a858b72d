mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Flag students below an attendance threshold and build a highlighted xlsx report"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an attendance document (PDF, image or XLSX) into an annotated workbook
    Process {
        /// Path to a .pdf, .jpg, .jpeg, .png or .xlsx file
        input_file: PathBuf,

        /// Subject column to check (matched case-insensitively against the header row)
        #[arg(short, long)]
        subject: Option<String>,

        /// JSON config file overriding the defaults
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: message (default) or json
        #[arg(short, long, default_value = "message")]
        output: String,
    },
    /// Extract the combined table from a document without annotating it
    Extract {
        /// Path to a .pdf, .jpg, .jpeg, .png or .xlsx file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the effective configuration as JSON
    Config {
        /// JSON config file to validate and print
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Process {
            input_file,
            subject,
            config,
            output,
        } => commands::process::run(input_file, subject, config, &output),
        Commands::Extract { input_file, output } => commands::extract::run(input_file, &output),
        Commands::Config { config } => commands::config::run(config),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
