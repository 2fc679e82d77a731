//! Helmschema CLI - JSON Schema generation for Helm chart values

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "helmschema")]
#[command(author = "Helmschema Contributors")]
#[command(version)]
#[command(about = "Generate JSON Schema for Helm chart values files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output (includes extracted comments)
    #[arg(long, global = true)]
    debug: bool,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schema from a values file
    Generate(GenerateArgs),

    /// Check a schema against Helm best practices
    Lint {
        /// Schema file
        #[arg(default_value = "values.schema.json")]
        schema: PathBuf,

        /// Exit with an error when errors are reported
        #[arg(long)]
        strict: bool,

        /// Output diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(debug: bool, verbose: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(exit_codes::USAGE_ERROR);
        }
        // --help and --version
        Err(err) => err.exit(),
    };
    init_tracing(cli.debug, cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => commands::generate::run(args, cli.debug),
        Commands::Lint {
            schema,
            strict,
            json,
        } => commands::lint::run(schema, *strict, *json),
    };

    let code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };

    std::process::exit(code);
}
