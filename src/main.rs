use clap::Parser;
use modgraph::cli::{Cli, Command};
use modgraph::{cmd_analyze, cmd_init};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Analyze(args)) => cmd_analyze(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => cmd_analyze(cli.analyze),
    };

    std::process::exit(exit_code);
}
