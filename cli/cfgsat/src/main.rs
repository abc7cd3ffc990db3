//! cfgsat: command-line feasibility checker for product configurations.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{CfgsatConfig, OutputFormat};

#[derive(Parser)]
#[command(
    name = "cfgsat",
    version,
    about = "Decide whether a product configuration is possible"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file (default: nearest cfgsat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default cfgsat.toml in the current directory
    Init,
    /// Decide whether the rules admit a configuration
    Solve {
        /// Rule file
        file: PathBuf,
        /// Components that must be selected (comma-separated)
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Declare rule operands missing from the component list
        #[arg(long)]
        implicit_components: bool,
    },
    /// Check one concrete selection against every rule
    Check {
        /// Rule file
        file: PathBuf,
        /// Selected components (comma-separated); everything else is off
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Declare rule operands missing from the component list
        #[arg(long)]
        implicit_components: bool,
    },
    /// List every feasible configuration (small catalogues only)
    Enumerate {
        /// Rule file
        file: PathBuf,
        /// Components every listed configuration must include
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// Maximum component count to enumerate (capped at 24)
        #[arg(long)]
        limit: Option<usize>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Declare rule operands missing from the component list
        #[arg(long)]
        implicit_components: bool,
    },
    /// Built-in product templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List available templates
    List,
    /// Print a template's rules
    Show {
        /// Template name
        name: String,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Write a template to a rule file
    Create {
        /// Template name
        name: String,
        /// Output path (default: <name>.rules)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a parsed command line. `Ok(false)` means the command ran but
/// the answer was negative (infeasible, violations, nothing to list).
fn run(cli: Cli) -> anyhow::Result<bool> {
    let cwd = std::env::current_dir()?;
    let config = CfgsatConfig::resolve(&cwd, cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::init::run(&cwd).map(|()| true),

        Commands::Solve {
            file,
            select,
            format,
            implicit_components,
        } => commands::solve::run(
            &file,
            &config.reader_options(implicit_components),
            &select,
            config.output_format(format),
        ),

        Commands::Check {
            file,
            select,
            format,
            implicit_components,
        } => commands::check::run(
            &file,
            &config.reader_options(implicit_components),
            &select,
            config.output_format(format),
        ),

        Commands::Enumerate {
            file,
            select,
            limit,
            format,
            implicit_components,
        } => commands::enumerate::run(
            &file,
            &config.reader_options(implicit_components),
            &select,
            limit.unwrap_or(config.enumerate.max_components),
            config.output_format(format),
        ),

        Commands::Template { action } => {
            match action {
                TemplateAction::List => commands::template::list()?,
                TemplateAction::Show { name, format } => {
                    commands::template::show(&name, config.output_format(format))?
                }
                TemplateAction::Create { name, output } => {
                    commands::template::create(&name, output.as_deref(), &cwd)?
                }
            }
            Ok(true)
        }
    }
}
