use std::process::ExitCode;

use blogger::{open_backend, App, BlogError, BlogStorage, Cli};
use clap::Parser;
use log::{debug, error};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    debug!("Logger initialized");
}

fn run(cli: Cli) -> blogger::Result<()> {
    let config = cli.resolve_config()?;
    let storage = BlogStorage::with_key(open_backend(&config), config.storage_key.clone());

    let mut app = App::new(storage, config, cli.verbose);
    app.prepare(&cli.command)?;
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(BlogError::Validation { errors }) => {
            for e in &errors {
                eprintln!("{} {}", console::style("error:").red().bold(), e);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", console::style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
