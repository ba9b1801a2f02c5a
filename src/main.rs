//! reTerminal Designer - ESPHome dashboard layout tool
//!
//! Command-line front end for importing ESPHome YAML snippets as layouts,
//! exporting layouts back to snippets and managing the layout store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reterminal_designer::cli::{
    CliError, ExitCode, ExportArgs, HardwareArgs, ImportArgs, LayoutsArgs,
};
use reterminal_designer::constants::APP_BINARY_NAME;

/// reTerminal Designer - ESPHome dashboard layout tool
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Layouts directory (defaults to the configured layouts directory)
    #[arg(long, global = true, value_name = "DIR")]
    layouts_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an ESPHome YAML snippet as a layout
    Import(ImportArgs),
    /// Export a layout as an ESPHome YAML snippet
    Export(ExportArgs),
    /// Manage stored layouts
    Layouts(LayoutsArgs),
    /// List hardware templates
    Hardware(HardwareArgs),
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let layouts_dir = cli.layouts_dir.as_ref();
    match &cli.command {
        Command::Import(args) => args.execute(layouts_dir),
        Command::Export(args) => args.execute(layouts_dir),
        Command::Layouts(args) => args.execute(layouts_dir),
        Command::Hardware(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for YAML/JSON output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code.code());
    }
    std::process::exit(ExitCode::Success.code());
}
