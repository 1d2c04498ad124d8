use clap::Parser;
use env_logger::Env;
use levelbake::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Build(args) => levelbake::cli::build::run(args)?,
        Commands::Check(args) => levelbake::cli::check::run(args)?,
        Commands::Watch(args) => levelbake::cli::watch::run(args)?,
        Commands::Completions(args) => levelbake::cli::completions::run(args)?,
    }

    Ok(())
}
