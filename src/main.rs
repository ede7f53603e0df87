mod error;
mod fetch;
mod parser;
mod pipeline;
mod problem;
mod render;
mod settings;
mod sources;
mod writer;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pipeline::{Options, Outcome};
use sources::Registry;

#[derive(Parser)]
#[command(name = "daisy", about = "Scrape a judge problem into a Rust project skeleton")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project from a problem URL
    Url {
        url: String,
        /// Directory to create the project in (default: output_dir setting)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Wrap width for header comments
        #[arg(short, long)]
        width: Option<usize>,
        /// Print lib.rs to stdout instead of writing files
        #[arg(long)]
        print: bool,
        /// Overwrite an existing project directory
        #[arg(long)]
        force: bool,
    },
    /// List supported sites
    Sites,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = Registry::with_defaults();

    match cli.command {
        Commands::Url { url, out_dir, width, print, force } => {
            let settings = settings::load()?.with_overrides(out_dir, width);
            let outcome = pipeline::generate(&registry, &url, &settings, Options { print, force }).await?;
            match outcome {
                Outcome::Unsupported(host) => println!("Unsupported site: {}", host),
                Outcome::Written(path) => println!("Created {}", path.display()),
                Outcome::Printed(lib) => print!("{}", lib),
            }
        }
        Commands::Sites => {
            for source in registry.sources() {
                println!("{:<10} {}", source.name(), source.hosts().join(", "));
            }
        }
    }
    Ok(())
}
