//! Veracity CLI - verify claims and documents from the command line.

use clap::Parser;
use veracity_cli::commands;
use veracity_cli::{logging, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        let formatter = Formatter::new(veracity_cli::output::OutputFormat::Text, true);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> veracity_cli::Result<()> {
    // Config commands must work even when the file is missing or broken
    if let Command::Config(args) = cli.command {
        let formatter = Formatter::new(
            cli.format.map(Into::into).unwrap_or(veracity_cli::output::OutputFormat::Text),
            !cli.no_color,
        );
        return commands::execute_config(args, cli.config.as_deref(), &formatter);
    }

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &config, &formatter).await,
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await,
        Command::FactCheck(args) => commands::execute_fact_check(args, &config, &formatter).await,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::Config(_) => unreachable!("handled above"),
    }
}
