mod sample;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "line-sampler")]
#[command(version)]
#[command(about = "Sample a fixed number of lines from a stream, keeping their original order", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct SampleArgs {
    /// Number of records to sample [default: 25]
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Records are delimited by NUL instead of newline
    #[arg(short = 'z', long = "null")]
    pub null: bool,

    /// Input file (default: stdin). Supports .gz, .bz2, .xz, .zst compression
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fixed random seed, any 64-bit signed integer (default: a value from the OS CSPRNG)
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// YAML config file with defaults for count, seed and delimiter
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write output without buffering
    #[arg(long)]
    pub no_buffer: bool,

    /// Show progress and a summary on stderr
    #[arg(short, long)]
    pub progress: bool,

    /// Print run statistics as JSON on stderr
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate(
                shell,
                &mut Cli::command(),
                "line-sampler",
                &mut io::stdout(),
            );
            Ok(())
        }
        None => sample::run(cli.sample),
    }
}
