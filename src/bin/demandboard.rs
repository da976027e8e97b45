use clap::Parser;
use colored::Colorize;
use demandboard_core::cli::{self, Cli};
use demandboard_core::config::Config;
use demandboard_core::exit::BoardExit;

fn main() -> BoardExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(cmd) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return BoardExit::Success;
    };

    let result = Config::load(cli.config.as_deref())
        .and_then(|mut config| cli::dispatch::execute(cmd, &mut config));

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            BoardExit::Error
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}
