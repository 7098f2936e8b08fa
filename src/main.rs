use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use libcompound::{Analysis, SearchConfig, WordStore};
use tracing_subscriber::EnvFilter;

/// Prints the longest word that is made up entirely of other words from the list.
///
/// Words are read one per line from every FILE in turn, and `-` reads standard
/// input at that point. Giving both files and `-` searches the combined list.
#[derive(Debug, Parser)]
#[command(name = "compound", version)]
struct Cli {
    /// Files containing a list of words to read in; `-` reads from standard input
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print every compound word, longest first, instead of only the longest
    #[arg(long)]
    all: bool,

    /// Do not remember failed splits while decomposing (slower on some inputs)
    #[arg(long)]
    no_memo: bool,

    /// Log progress to stderr (RUST_LOG is honoured when set)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log nothing, not even warnings
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        EnvFilter::new("off")
    } else if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Nothing to read from: show usage rather than wait on a terminal.
    if cli.files.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return Ok(());
    }

    init_tracing(&cli);

    let store = load_words(&cli.files)?;
    let config = SearchConfig {
        memoize: !cli.no_memo,
    };
    let mut analysis = Analysis::new(store, config);

    let mut out = io::stdout().lock();
    if cli.all {
        let mut found = 0usize;
        for compound in analysis.compounds() {
            writeln!(out, "{compound}")?;
            found += 1;
        }
        if found == 0 {
            eprintln!("no compound word found");
        }
    } else {
        match analysis.longest_compound() {
            Some(compound) => writeln!(out, "{compound}")?,
            None => eprintln!("no compound word found"),
        }
    }
    out.flush()?;
    Ok(())
}

/// Reads every source into one store, in the order given.
///
/// Any source that cannot be opened or read ends the run.
fn load_words(sources: &[PathBuf]) -> anyhow::Result<WordStore> {
    let mut store = WordStore::new();
    for source in sources {
        if is_stdin(source) {
            store
                .read_from(io::stdin().lock())
                .context("failed to read standard input")?;
        } else {
            let file = File::open(source)
                .with_context(|| format!("failed to open {}", source.display()))?;
            store
                .read_from(BufReader::new(file))
                .with_context(|| format!("failed to read {}", source.display()))?;
        }
    }
    Ok(store)
}

fn is_stdin(source: &Path) -> bool {
    source.as_os_str() == "-"
}
