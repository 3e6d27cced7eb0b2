use colored::Colorize;
use hoist::cli::Cli;
use hoist::util::SystemRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse_args();

    match hoist::run(&cli, &mut SystemRunner) {
        Ok(()) => {
            println!("{}", "Container built and pushed to ECR".green());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}
