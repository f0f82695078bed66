//! Literal set command-line interface

use clap::{Parser, Subcommand};
use litset_cli::cli::check::{self, Relation};
use litset_cli::cli::output::{self, ColorMode, OutputFormat};
use litset_cli::cli::{fold, operators, show};
use litset_literals::Precision;
use std::path::PathBuf;

/// Literal value set tool
#[derive(Parser)]
#[command(name = "litset")]
#[command(
    author,
    version,
    about = "Inspect, compare and fold literal value sets",
    long_about = None
)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t, global = true)]
    color: ColorMode,

    /// Relative digits two numbers must share to compare equal
    #[arg(long, default_value_t = Precision::DEFAULT.rel_digits, global = true)]
    rel_digits: u32,

    /// Differences below 10^-N are ignored in comparisons
    #[arg(long, default_value_t = Precision::DEFAULT.abs_digits, global = true)]
    abs_digits: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode literal files and print them
    Show {
        /// JSON files holding a literal or an array of literals
        files: Vec<PathBuf>,
    },

    /// Test whether a relation holds between two literals
    Check {
        #[arg(value_enum)]
        relation: Relation,

        /// Left-hand literal file
        lhs: PathBuf,

        /// Right-hand literal file
        rhs: PathBuf,
    },

    /// Apply an operator to literal operands
    Fold {
        /// Operator name, e.g. add, intersection, greater_or_equal
        operator: String,

        /// Operand files, in order
        files: Vec<PathBuf>,
    },

    /// List the operators fold accepts
    Operators,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let precision = Precision::new(cli.rel_digits, cli.abs_digits);

    let result = match cli.command {
        Commands::Show { files } => show::show(show::ShowConfig {
            files,
            format: cli.format,
            output_file: cli.output,
        }),

        Commands::Check { relation, lhs, rhs } => {
            let config = check::CheckConfig {
                relation,
                lhs,
                rhs,
                precision,
                format: cli.format,
                output_file: cli.output,
            };
            match check::check(&config) {
                Ok(true) => Ok(()),
                Ok(false) => std::process::exit(1),
                Err(e) => Err(e),
            }
        }

        Commands::Fold { operator, files } => fold::fold(fold::FoldConfig {
            operator,
            files,
            precision,
            format: cli.format,
            output_file: cli.output,
        }),

        Commands::Operators => operators::list(cli.format)
            .and_then(|content| output::write_output(&content, cli.output.as_deref())),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
