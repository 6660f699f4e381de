//! FALSE interpreter CLI
//!
//! Runs a FALSE program from a file. Extra arguments are passed to the
//! program in the variables `a` (count) and `b`..`z` (values).

mod host;
mod settings;

use clap::Parser as ClapParser;
use false_runtime::{Config, interpret};
use host::StdioHost;
use settings::Settings;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "falsei")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FALSE interpreter - run .f programs", long_about = None)]
struct Cli {
    /// FALSE source file
    file: PathBuf,

    /// Numeric arguments for the program (at most 25)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    arguments: Vec<String>,

    /// Text read by `^` before standard input, followed by a newline
    #[arg(short, long, value_name = "STRING")]
    input: Option<String>,

    /// Log every executed symbol and stack operation to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Enable the extended operator set
    #[arg(short = 'x', long)]
    extensions: bool,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Settings::default(),
    };
    let settings = settings.merge(cli.extensions, cli.verbose, cli.input);

    init_logging(settings.verbose);

    let source = std::fs::read(&cli.file).unwrap_or_else(|e| {
        eprintln!("{}: {}", cli.file.display(), e);
        process::exit(1);
    });
    let name = cli.file.display().to_string();

    let mut args = vec![name.clone()];
    args.extend(cli.arguments);
    debug!(file = %name, args = args.len() - 1, "loaded program");

    let mut host = StdioHost::new(io::stdin().lock(), io::stdout().lock(), &name, &source)
        .with_input(settings.input.as_deref())
        .with_trace(settings.verbose);

    let mut config = Config::new(&source, &mut host)
        .with_args(args)
        .with_extensions(settings.extensions)
        .with_shebang_skipped(true);
    if settings.verbose {
        config = config.with_stack_log(Box::new(|op: &str, record: &str| {
            debug!(target: "falsei::stack", "{:>6} {}", op, record);
        }));
    }

    let result = interpret(config);
    host.flush_output();

    if result.is_err() {
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
