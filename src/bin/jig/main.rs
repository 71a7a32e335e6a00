//! jig CLI tool
//!
//! Composable filters over a folder of markdown notes. Every command reads standard input and
//! writes standard output, so they chain with ordinary pipes:
//!
//! ```text
//! find notes -name '*.md' | jig nodes | jig edges
//! find notes -name '*.md' | jig tree -f md
//! find notes -name '*.md' | jig search 'TODO' -f csv
//! ```
//!
//! ## Commands
//!
//! - `nodes`: paths in, node CSV out
//! - `edges`: node CSV in, edge CSV out
//! - `tree`: paths or node CSV in, indented hierarchy out
//! - `search <PATTERN>`: paths in, files ranked by match count out
//!
//! Logs and diagnostics go to standard error. Set `RUST_LOG=debug` to see every skipped record.

use clap::{Parser, Subcommand};
use jig_core::{
    commands::Op,
    graph::{LinkMatch, TreeFormat},
    search::SearchFormat,
};
use std::{
    io::{BufWriter, Write},
    process::ExitCode,
};

const FORMAT_ENV: &str = "JIG_FORMAT";

#[derive(Parser)]
#[command(name = "jig")]
#[command(author, version, about = "Turn a folder of markdown notes into a navigable graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read note paths from stdin and write one node CSV record per path
    Nodes,

    /// Read node CSV from stdin and write the resolved parent edges as CSV
    Edges {
        /// How a link is compared against note paths: substring or exact
        #[arg(short = 'm', long = "match", default_value = "substring")]
        strategy: LinkMatch,
    },

    /// Read note paths or node CSV from stdin and print the note hierarchy
    Tree {
        /// Output form: md, csv, or anything else for the plain listing [env: JIG_FORMAT]
        #[arg(short, long)]
        format: Option<String>,

        /// How a link is compared against note paths: substring or exact
        #[arg(short = 'm', long = "match", default_value = "substring")]
        strategy: LinkMatch,
    },

    /// Read note paths from stdin and rank the files by how often PATTERN matches
    Search {
        /// Regular expression to count
        pattern: String,

        /// Output form: table or csv
        #[arg(short, long, default_value = "table")]
        format: SearchFormat,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,
    },
}

impl Commands {
    fn into_op(self) -> Op {
        match self {
            Commands::Nodes => Op::Nodes,
            Commands::Edges { strategy } => Op::Edges { strategy },
            Commands::Tree { format, strategy } => {
                let format = format.or_else(|| std::env::var(FORMAT_ENV).ok());
                Op::Tree {
                    format: TreeFormat::from(format.as_deref()),
                    strategy,
                }
            }
            Commands::Search {
                pattern,
                format,
                ignore_case,
            } => Op::Search {
                pattern,
                format,
                ignore_case,
            },
        }
    }
}

fn main() -> ExitCode {
    // Logs share stderr with diagnostics; stdout carries only data
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let op = cli.command.into_op();

    let stdin = std::io::stdin();
    let mut stdout = BufWriter::new(std::io::stdout().lock());

    match op.run(stdin.lock(), &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_output_closed() => {
            // Downstream stopped reading, e.g. `jig tree | head -1`
            tracing::debug!("{op}: {e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Anything already buffered still belongs to the output
            let _ = stdout.flush();
            if e.is_fatal() {
                tracing::error!("{op} aborted: {e}");
            }
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
