use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use enumflags2::BitFlags;
use simplifier::{format::DEFAULT_EPSILON_MARKER, Pass, TextFormat};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PassArg {
    /// Remove ε-productions
    Erasing,
    /// Remove unit productions
    Unit,
    /// Remove unreachable and non-generating variables
    Useless,
}

impl From<PassArg> for Pass {
    fn from(pass: PassArg) -> Self {
        match pass {
            PassArg::Erasing => Pass::Erasing,
            PassArg::Unit => Pass::Unit,
            PassArg::Useless => Pass::Useless,
        }
    }
}

/// Remove empty, unit and useless productions from a context-free grammar
#[derive(Parser, Debug)]
#[command(name = "simplify", version)]
struct Args {
    /// Path to the grammar file
    input: PathBuf,
    /// Path to write the simplified grammar to. Printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Passes to run. Selected passes always run in the order erasing, unit, useless
    #[arg(short, long, value_enum, value_delimiter = ',')]
    passes: Vec<PassArg>,
    /// Character that marks an empty production body in the grammar files
    #[arg(long, default_value_t = DEFAULT_EPSILON_MARKER)]
    epsilon: char,
    /// Print a table with the grammar size after each pass to stderr
    #[arg(long)]
    summary: bool,
    /// Print the result in set notation instead of the file format
    #[arg(long, conflicts_with = "output")]
    definition: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let format = TextFormat::new(args.epsilon);
    let grammar = format
        .load(&args.input)
        .with_context(|| format!("failed to load grammar from {}", args.input.display()))?;

    let passes = if args.passes.is_empty() {
        BitFlags::all()
    } else {
        args.passes.iter().copied().map(Pass::from).collect()
    };
    tracing::info!("Simplifying {} with {:?}", args.input.display(), passes);

    let (simplified, summary) = grammar.simplify_traced(passes);

    if args.summary {
        eprint!("{summary}");
    }

    if args.definition {
        print!("{}", simplified.definition());
        return Ok(());
    }

    let text = format.write(&simplified)?;
    match args.output {
        Some(path) => fs::write(&path, text)
            .with_context(|| format!("failed to write grammar to {}", path.display()))?,
        None => print!("{text}"),
    }

    Ok(())
}
