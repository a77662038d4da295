use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use domain::errors::DeptestError;
use services::config::load_config;
use services::output::print_error;

fn main() {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        let code = e
            .downcast_ref::<DeptestError>()
            .map(DeptestError::code)
            .unwrap_or("INTERNAL_ERROR");
        print_error(cli.json, code, &e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    commands::handle_command(cli, &config)
}
