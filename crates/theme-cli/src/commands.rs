use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => handlers::run::handle(&args),

        Commands::Sessions {
            config,
            cache_folder,
        } => handlers::sessions::handle(config.as_deref(), cache_folder.as_deref()),

        Commands::Init { path, force } => handlers::init::handle(&path, force),
    }
}
