//! ifuzz CLI.
//!
//! Reads a source unit (interface declarations plus comment blocks) as
//! JSON and writes the generated differential-test harnesses.

use clap::{Args, Parser, Subcommand};
use ifuzz::config::Options;
use ifuzz::logging::{self, LogFormat, LogLevel};
use ifuzz::runner::{run, RunReport};
use ifuzz::unit::SourceUnit;
use ifuzz::{Error, FuzzResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code when annotations or declarations are at fault.
const EXIT_STAGE_ERRORS: u8 = 1;
/// Exit code when input or output could not be read, written or decoded.
const EXIT_IO: u8 = 2;

#[derive(Parser)]
#[command(name = "ifuzz")]
#[command(about = "Generate differential fuzz harnesses for annotated interfaces", long_about = None)]
#[command(version)]
struct Cli {
    /// Log directives and harnesses as they are processed.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Generate harness code for a source unit
    Generate {
        /// Source unit JSON file.
        unit: PathBuf,

        /// Write the code here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Run every stage and report errors without writing code
    Check {
        /// Source unit JSON file.
        unit: PathBuf,

        /// JSON options file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// JSON options file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit a complete file with package clause and imports.
    #[arg(long)]
    complete: bool,

    /// Package name for complete files.
    #[arg(long)]
    package: Option<String>,

    /// Do not emit the FuzzTest<I> entry routine.
    #[arg(long)]
    no_test_case: bool,

    /// Do not emit the Fuzz<I> driver (implies --no-test-case).
    #[arg(long)]
    no_default_fuzz: bool,

    /// PRNG seed used by the entry routine.
    #[arg(long)]
    seed: Option<u64>,

    /// Operations performed by the entry routine.
    #[arg(long)]
    iterations: Option<u64>,
}

impl OptionArgs {
    fn resolve(&self) -> FuzzResult<Options> {
        let mut options = load_options(self.config.as_deref())?;
        options.complete |= self.complete;
        if self.package.is_some() {
            options.package = self.package.clone();
        }
        if self.no_test_case {
            options.emit_test_case = false;
        }
        if self.no_default_fuzz {
            options.emit_default_fuzz = false;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            options.iterations = iterations;
        }
        Ok(options)
    }
}

fn load_options(path: Option<&Path>) -> FuzzResult<Options> {
    match path {
        Some(path) => Options::load(path),
        None => Ok(Options::standard()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format, LogLevel::from_verbose(cli.verbose));

    match cli.command {
        Some(Commands::Version) => {
            println!("ifuzz v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Generate {
            unit,
            output,
            options,
        }) => match options
            .resolve()
            .and_then(|options| generate(&unit, output, &options))
        {
            Ok(report) => report_errors(&report),
            Err(err) => io_failure(&err),
        },
        Some(Commands::Check { unit, config }) => {
            match load_options(config.as_deref()).and_then(|options| check(&unit, &options)) {
                Ok(report) => report_errors(&report),
                Err(err) => io_failure(&err),
            }
        }
        None => {
            println!("ifuzz v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn generate(unit: &Path, output: Option<PathBuf>, options: &Options) -> FuzzResult<RunReport> {
    let report = check(unit, options)?;
    match output {
        Some(path) => fs::write(&path, &report.output).map_err(|source| Error::Io { path, source })?,
        None => print!("{}", report.output),
    }
    Ok(report)
}

fn check(unit: &Path, options: &Options) -> FuzzResult<RunReport> {
    let unit = SourceUnit::load(unit)?;
    Ok(run(&unit, options))
}

fn report_errors(report: &RunReport) -> ExitCode {
    if report.is_clean() {
        return ExitCode::SUCCESS;
    }
    eprintln!("{} error(s):", report.errors.len());
    for err in &report.errors {
        eprintln!("  - {}", err);
    }
    ExitCode::from(EXIT_STAGE_ERRORS)
}

fn io_failure(err: &Error) -> ExitCode {
    eprintln!("ifuzz: {}", err);
    ExitCode::from(EXIT_IO)
}
