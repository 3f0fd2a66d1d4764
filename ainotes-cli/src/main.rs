//! ainotes CLI - run the notes API and work with notes from the terminal
//!
//! - `serve`: HTTP API over a local SQLite file (with `server` feature)
//! - `notes`: list, show, add, edit and remove notes through a running server
//! - `config`: inspect or create `~/.ainotes/config.toml`
//! - `completions`: shell completion scripts

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ainotes",
    author,
    version,
    about = "Minimal note-taking backend and client",
    long_about = "Serve a small JSON API for short text notes backed by SQLite, \
                  and create, list, edit or delete notes against it from the shell."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Work with notes on a running server (list, show, add, edit, rm)
    Notes(commands::notes::NotesArgs),
    /// Manage ainotes configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

fn run_completions(args: CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "ainotes", &mut std::io::stdout());
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load but don't fail if .env is missing
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Notes(args) => commands::run_notes(args).await?,
        Commands::Config(args) => config::run_config(args)?,
        Commands::Completions(args) => run_completions(args),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::try_parse_from(["ainotes", "notes", "list", "--debug"]).unwrap();
        assert!(cli.debug);
    }
}
