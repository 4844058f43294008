use anyhow::Result;
use clap::Parser;

use handcrack::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    handcrack::output::set_quiet(cli.quiet);
    handcrack::output::init_logging(cli.verbose);

    let config = cli.load_config()?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => handcrack::cli::menu::run(&config),
        Commands::Generate(args) => handcrack::cli::generate::run(args, &config),
        Commands::List(args) => handcrack::cli::list::run(args, &config),
        Commands::Scripts => handcrack::cli::scripts::list(&config),
        Commands::Run(args) => handcrack::cli::scripts::run(args, &config),
        Commands::Info(args) => handcrack::cli::info::run(args, &config),
    }
}
