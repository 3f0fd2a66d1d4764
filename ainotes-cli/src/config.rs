use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ainotes_core::NotesConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective config (file merged over defaults) as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_path() -> Result<()> {
    println!("{}", NotesConfig::config_path().display());
    Ok(())
}

fn run_show() -> Result<()> {
    let config = NotesConfig::load().context("Failed to load config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = NotesConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    NotesConfig::default()
        .write_to(&config_path)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {:?}", config_path);
    Ok(())
}
