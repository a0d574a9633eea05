mod cli;
mod commands;

use cli::{Cli, Command};
use commands::dis::DisArgs;
use commands::dump::DumpArgs;

fn main() {
    let cli = <Cli as clap::Parser>::parse();

    match cli.command {
        Command::Dump {
            graph,
            output,
            weak,
            prefix,
        } => {
            commands::dump::run(DumpArgs {
                graph,
                output,
                weak,
                prefix,
            });
        }
        Command::Dis { words } => {
            commands::dis::run(DisArgs { words });
        }
    }
}
