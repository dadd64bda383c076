use clap::Parser;
use miette::Result;
use tokenwind::cli::{Cli, Commands};
use tokenwind::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = if cli.quiet {
        Printer::quiet()
    } else {
        Printer::new()
    };

    match cli.command {
        Commands::Build(args) => tokenwind::cli::build::run(args, &printer)?,
        Commands::Init(args) => tokenwind::cli::init::run(args, &printer)?,
        Commands::Validate(args) => tokenwind::cli::validate::run(args, &printer)?,
        Commands::List(args) => tokenwind::cli::list::run(args, &printer)?,
        Commands::Export(args) => tokenwind::cli::export::run(args, &printer)?,
        Commands::Completions(args) => tokenwind::cli::completions::run(args)?,
    }

    Ok(())
}
