use clap::Parser;
use modgate::cli::{CheckArgs, Cli, Command};
use modgate::{cmd_check, cmd_init};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Check(args)) => cmd_check(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => {
            let args = CheckArgs {
                path: cli.path,
                ..Default::default()
            };
            cmd_check(args)
        }
    };

    std::process::exit(exit_code);
}
